use std::path::Path;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use meal_combo_rs::cli::{Cli, Command, StrategyChoice};
use meal_combo_rs::config::RecommenderConfig;
use meal_combo_rs::data::{Catalog, load_catalog, load_config, load_profile};
use meal_combo_rs::error::Result;
use meal_combo_rs::interface::{
    display_categories, display_recommendations, display_requirements, display_targets,
    prompt_profile,
};
use meal_combo_rs::models::UserProfile;
use meal_combo_rs::planner::{calculate_requirements, get_recommendations, StrategyKind};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    let catalog = load_catalog(&cli.catalog)?;
    println!("Loaded {} foods from {}", catalog.len(), cli.catalog.display());

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RecommenderConfig::default(),
    };

    match command {
        Command::Categories => {
            display_categories(&catalog.categories());
            Ok(())
        }
        Command::Requirements => {
            let profile = resolve_profile(cli.profile.as_deref(), &catalog)?;
            cmd_requirements(&profile, &config);
            Ok(())
        }
        Command::Recommend { strategy, count } => {
            let profile = resolve_profile(cli.profile.as_deref(), &catalog)?;
            cmd_recommend(&catalog, &profile, &config, strategy, count);
            Ok(())
        }
    }
}

/// Load the profile from file, or collect it interactively.
fn resolve_profile(path: Option<&Path>, catalog: &Catalog) -> Result<UserProfile> {
    match path {
        Some(path) => load_profile(path),
        None => {
            let categories: Vec<String> = catalog.categories().into_keys().collect();
            println!();
            prompt_profile(&categories)
        }
    }
}

/// Show daily requirements and every strategy's per-meal targets.
fn cmd_requirements(profile: &UserProfile, config: &RecommenderConfig) {
    let daily = calculate_requirements(profile);
    display_requirements(profile, &daily);

    println!("--- Per-meal targets ---");
    for kind in StrategyKind::ALL {
        display_targets(kind.as_str(), &kind.targets(config, &daily));
    }
    println!();
}

/// Run the chosen strategies and print their combinations.
fn cmd_recommend(
    catalog: &Catalog,
    profile: &UserProfile,
    config: &RecommenderConfig,
    choice: StrategyChoice,
    count: usize,
) {
    let daily = calculate_requirements(profile);
    display_requirements(profile, &daily);

    let preference = profile.preferred_category();
    match preference {
        Some(p) => {
            println!("Preferred category: {}", p);
            if !catalog.has_category(p) {
                warn!(category = p, "preferred category matches no catalog food");
            }
        }
        None => println!("No preferred category set."),
    }
    println!();

    let mut rng = rand::thread_rng();
    for kind in choice.kinds() {
        display_targets(kind.as_str(), &kind.targets(config, &daily));
        let results = get_recommendations(kind, config, catalog, &daily, preference, count, &mut rng);
        display_recommendations(kind.as_str(), &results);
    }
}
