use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::planner::StrategyKind;

/// meal_combo: recommends single-meal food combinations that stay under an
/// energy ceiling while meeting protein, fat and carbohydrate floors.
#[derive(Parser, Debug)]
#[command(name = "meal_combo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the food catalog (CSV, or JSON with a .json extension).
    #[arg(short, long, global = true, default_value = "foods.csv")]
    pub catalog: PathBuf,

    /// JSON file overriding strategy settings.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON user profile. Prompted for interactively when omitted.
    #[arg(short, long, global = true)]
    pub profile: Option<PathBuf>,
}

/// Which strategies to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StrategyChoice {
    Greedy,
    Backtracking,
    Genetic,
    #[default]
    All,
}

impl StrategyChoice {
    pub fn kinds(self) -> Vec<StrategyKind> {
        match self {
            StrategyChoice::Greedy => vec![StrategyKind::Greedy],
            StrategyChoice::Backtracking => vec![StrategyKind::Backtracking],
            StrategyChoice::Genetic => vec![StrategyKind::Genetic],
            StrategyChoice::All => StrategyKind::ALL.to_vec(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Recommend meal combinations for a profile.
    Recommend {
        /// Strategy to run.
        #[arg(short, long, value_enum, default_value_t = StrategyChoice::All)]
        strategy: StrategyChoice,

        /// Number of combinations per strategy.
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
    },

    /// Show daily requirements and per-meal targets for each strategy.
    Requirements,

    /// List catalog categories with their food counts.
    Categories,
}

impl Default for Command {
    fn default() -> Self {
        Command::Recommend {
            strategy: StrategyChoice::All,
            count: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_recommend_all() {
        let cli = Cli::try_parse_from(["meal_combo"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.catalog, PathBuf::from("foods.csv"));
        assert!(matches!(
            Command::default(),
            Command::Recommend {
                strategy: StrategyChoice::All,
                count: 5
            }
        ));
    }

    #[test]
    fn test_parse_recommend_flags() {
        let cli = Cli::try_parse_from([
            "meal_combo",
            "recommend",
            "--strategy",
            "genetic",
            "-n",
            "3",
            "--catalog",
            "db.json",
        ])
        .unwrap();

        assert_eq!(cli.catalog, PathBuf::from("db.json"));
        match cli.command {
            Some(Command::Recommend { strategy, count }) => {
                assert_eq!(strategy.kinds(), vec![StrategyKind::Genetic]);
                assert_eq!(count, 3);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
