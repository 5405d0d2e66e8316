use std::time::{Duration, Instant};

use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::RecommenderConfig;
use crate::data::Catalog;
use crate::evaluation::metrics::{QualityReport, evaluate_results, reference_targets};
use crate::models::UserProfile;
use crate::planner::{StrategyKind, calculate_requirements, get_recommendations};

/// Settings for one benchmark run.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    pub strategies: Vec<StrategyKind>,
    pub count: usize,
    /// Percent error allowed per dimension for a strict success.
    pub tolerance: f64,
    pub recommender: RecommenderConfig,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            strategies: StrategyKind::ALL.to_vec(),
            count: crate::planner::DEFAULT_BENCHMARK_COUNT,
            tolerance: crate::planner::DEFAULT_STRICT_TOLERANCE,
            recommender: RecommenderConfig::default(),
        }
    }
}

/// Outcome of running one strategy.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyReport {
    pub strategy: StrategyKind,
    pub found: usize,
    pub elapsed: Duration,
    /// `None` when the strategy found nothing.
    pub quality: Option<QualityReport>,
}

/// Run every configured strategy on the same catalog, profile and count.
pub fn run_benchmark<R: Rng + ?Sized>(
    catalog: &Catalog,
    profile: &UserProfile,
    config: &BenchmarkConfig,
    rng: &mut R,
) -> Vec<StrategyReport> {
    let daily = calculate_requirements(profile);
    let reference = reference_targets(&daily);
    let preference = profile.preferred_category();
    if let Some(label) = preference {
        if !catalog.has_category(label) {
            warn!(category = label, "preferred category matches no catalog food");
        }
    }

    config
        .strategies
        .iter()
        .map(|&strategy| {
            let start = Instant::now();
            let results = get_recommendations(
                strategy,
                &config.recommender,
                catalog,
                &daily,
                preference,
                config.count,
                rng,
            );
            let elapsed = start.elapsed();
            let quality = evaluate_results(&results, &reference, config.tolerance);

            info!(
                %strategy,
                found = results.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "benchmark strategy finished"
            );
            StrategyReport {
                strategy,
                found: results.len(),
                elapsed,
                quality,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, DietPurpose, Food, Sex};
    use crate::planner::GeneticConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_benchmark_reports_every_strategy() {
        let catalog = Catalog::new(vec![
            Food::new("Rice", "Rice", 300.0, 6.0, 1.0, 65.0),
            Food::new("Bulgogi", "Grilled", 400.0, 30.0, 18.0, 20.0),
            Food::new("Mackerel", "Grilled", 250.0, 25.0, 15.0, 0.0),
            Food::new("Tofu Stew", "Stew", 200.0, 15.0, 10.0, 10.0),
            Food::new("Kimchi", "Kimchi", 30.0, 2.0, 0.5, 4.0),
        ]);
        let profile = UserProfile {
            height_cm: 184.0,
            weight_kg: 72.0,
            age: 24,
            sex: Sex::Male,
            purpose: DietPurpose::Normal,
            activity: ActivityLevel::Moderate,
            preferences: vec!["Rice".to_string()],
        };
        let mut recommender = RecommenderConfig::default();
        recommender.genetic = GeneticConfig::with_population(10, 2);
        let config = BenchmarkConfig {
            count: 3,
            recommender,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(99);

        let reports = run_benchmark(&catalog, &profile, &config, &mut rng);

        assert_eq!(reports.len(), 3);
        for report in &reports {
            assert!(report.found <= 3);
            assert_eq!(report.quality.is_some(), report.found > 0);
        }
    }

    #[test]
    fn test_unmatched_preference_still_benchmarks() {
        let catalog = Catalog::new(vec![
            Food::new("Bap", "밥", 300.0, 6.0, 1.0, 65.0),
            Food::new("Bulgogi", "구이", 400.0, 30.0, 18.0, 20.0),
            Food::new("Mackerel", "구이", 250.0, 25.0, 15.0, 0.0),
            Food::new("Kimchi", "김치", 30.0, 2.0, 0.5, 4.0),
        ]);
        let profile = UserProfile {
            height_cm: 184.0,
            weight_kg: 72.0,
            age: 24,
            sex: Sex::Male,
            purpose: DietPurpose::Normal,
            activity: ActivityLevel::Moderate,
            preferences: vec!["Rice".to_string()],
        };
        assert!(!catalog.has_category("Rice"));

        let mut recommender = RecommenderConfig::default();
        recommender.genetic = GeneticConfig::with_population(10, 2);
        let config = BenchmarkConfig {
            count: 2,
            recommender,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(7);

        let reports = run_benchmark(&catalog, &profile, &config, &mut rng);
        assert_eq!(reports.len(), 3);
        assert!(reports.iter().all(|r| r.found <= 2));
    }
}
