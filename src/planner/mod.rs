pub mod backtracking;
pub mod constants;
pub mod genetic;
pub mod greedy;
pub mod registry;
pub mod requirements;
pub mod targets;

use std::fmt;

use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::RecommenderConfig;
use crate::data::Catalog;
use crate::models::{DailyRequirements, Recommendation, Targets};

pub use backtracking::{BacktrackingConfig, BacktrackingSearch};
pub use constants::*;
pub use genetic::{GeneticConfig, GeneticSearch};
pub use greedy::{GreedyConfig, GreedySearch};
pub use registry::CombinationRegistry;
pub use requirements::{basal_metabolic_rate, calculate_requirements, total_daily_energy};
pub use targets::TargetPolicy;

/// A strategy that proposes distinct food combinations for one meal.
///
/// Every result stays within the energy ceiling, has no repeated food, and
/// carries a signature not seen earlier in the same call.
pub trait CombinationSearch {
    fn name(&self) -> &'static str;

    /// Policy used to turn daily requirements into this strategy's targets.
    fn target_policy(&self) -> &TargetPolicy;

    /// Up to `count` distinct combinations for the given targets.
    fn find_combinations<'a, R: Rng + ?Sized>(
        &self,
        catalog: &'a Catalog,
        targets: &Targets,
        preference: Option<&str>,
        count: usize,
        rng: &mut R,
    ) -> Vec<Recommendation<'a>>;

    /// Derive targets with this strategy's policy, then search.
    fn get_recommendations<'a, R: Rng + ?Sized>(
        &self,
        catalog: &'a Catalog,
        daily: &DailyRequirements,
        preference: Option<&str>,
        count: usize,
        rng: &mut R,
    ) -> Vec<Recommendation<'a>> {
        let targets = self.target_policy().derive(daily);
        self.find_combinations(catalog, &targets, preference, count, rng)
    }
}

/// The available search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Greedy,
    Backtracking,
    Genetic,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Greedy,
        StrategyKind::Backtracking,
        StrategyKind::Genetic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Greedy => "greedy",
            StrategyKind::Backtracking => "backtracking",
            StrategyKind::Genetic => "genetic",
        }
    }

    /// Targets this strategy would search against.
    pub fn targets(self, config: &RecommenderConfig, daily: &DailyRequirements) -> Targets {
        match self {
            StrategyKind::Greedy => config.greedy.targets.derive(daily),
            StrategyKind::Backtracking => config.backtracking.targets.derive(daily),
            StrategyKind::Genetic => config.genetic.targets.derive(daily),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Run one strategy, configured from `config`, against daily requirements.
pub fn get_recommendations<'a, R: Rng + ?Sized>(
    kind: StrategyKind,
    config: &RecommenderConfig,
    catalog: &'a Catalog,
    daily: &DailyRequirements,
    preference: Option<&str>,
    count: usize,
    rng: &mut R,
) -> Vec<Recommendation<'a>> {
    match kind {
        StrategyKind::Greedy => GreedySearch::new(config.greedy.clone())
            .get_recommendations(catalog, daily, preference, count, rng),
        StrategyKind::Backtracking => BacktrackingSearch::new(config.backtracking.clone())
            .get_recommendations(catalog, daily, preference, count, rng),
        StrategyKind::Genetic => GeneticSearch::new(config.genetic.clone())
            .get_recommendations(catalog, daily, preference, count, rng),
    }
}
