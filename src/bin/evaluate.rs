use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use meal_combo_rs::config::RecommenderConfig;
use meal_combo_rs::data::{load_catalog, load_config};
use meal_combo_rs::error::Result;
use meal_combo_rs::evaluation::{
    BenchmarkConfig, StrategyReport, reference_targets, run_benchmark, write_csv, write_json,
};
use meal_combo_rs::interface::display_reports;
use meal_combo_rs::models::{ActivityLevel, DietPurpose, Sex, UserProfile};
use meal_combo_rs::planner::{
    DEFAULT_BENCHMARK_COUNT, DEFAULT_STRICT_TOLERANCE, GENETIC_GENERATIONS,
    GENETIC_POPULATION_SIZE, StrategyKind, TargetPolicy, calculate_requirements,
};

#[derive(Parser, Debug)]
#[command(name = "evaluate")]
#[command(about = "Compare the quality and speed of every recommendation strategy")]
struct Args {
    /// Path to the food catalog
    #[arg(long, default_value = "foods.csv")]
    catalog: PathBuf,

    /// Combinations requested from each strategy
    #[arg(long, default_value_t = DEFAULT_BENCHMARK_COUNT)]
    count: usize,

    /// Percent error allowed per dimension for a strict success
    #[arg(long, default_value_t = DEFAULT_STRICT_TOLERANCE)]
    tolerance: f64,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Genetic population size
    #[arg(long, default_value_t = GENETIC_POPULATION_SIZE)]
    population: usize,

    /// Genetic generation count
    #[arg(long, default_value_t = GENETIC_GENERATIONS)]
    generations: usize,

    /// JSON file overriding strategy settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output CSV file for the comparison
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Output JSON file for the comparison
    #[arg(long)]
    json: Option<PathBuf>,

    /// Derive every strategy's targets from the same reference policy
    #[arg(long)]
    shared_targets: bool,
}

/// Fixed profile every benchmark run is scored for.
fn benchmark_profile() -> UserProfile {
    UserProfile {
        height_cm: 184.0,
        weight_kg: 72.0,
        age: 24,
        sex: Sex::Male,
        purpose: DietPurpose::Normal,
        activity: ActivityLevel::Moderate,
        preferences: vec!["Rice".to_string(), "Steamed".to_string(), "Grilled".to_string()],
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let catalog = load_catalog(&args.catalog)?;
    println!("Loaded {} foods from {:?}", catalog.len(), args.catalog);

    let mut recommender = match &args.config {
        Some(path) => load_config(path)?,
        None => RecommenderConfig::default(),
    };
    recommender.genetic.population_size = args.population;
    recommender.genetic.generations = args.generations;
    if args.shared_targets {
        recommender = recommender.with_shared_targets(TargetPolicy::reference());
    }

    let profile = benchmark_profile();
    let reference = reference_targets(&calculate_requirements(&profile));
    println!("=== Per-meal reference ===");
    println!(
        "kcal: {:.2}  carbs: {:.2}  protein: {:.2}  fat: {:.2}",
        reference.energy, reference.carbs, reference.protein, reference.fat
    );

    let config = BenchmarkConfig {
        strategies: StrategyKind::ALL.to_vec(),
        count: args.count,
        tolerance: args.tolerance,
        recommender,
    };

    let reports: Vec<StrategyReport> = match args.seed {
        Some(seed) => run_benchmark(&catalog, &profile, &config, &mut StdRng::seed_from_u64(seed)),
        None => run_benchmark(&catalog, &profile, &config, &mut rand::thread_rng()),
    };

    display_reports(&reports, args.tolerance);

    if let Some(path) = &args.csv {
        write_csv(&reports, path)?;
        println!("Wrote comparison to {:?}", path);
    }
    if let Some(path) = &args.json {
        write_json(&reports, args.tolerance, path)?;
        println!("Wrote comparison to {:?}", path);
    }
    Ok(())
}
