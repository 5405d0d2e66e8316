use std::collections::BTreeMap;

use crate::evaluation::StrategyReport;
use crate::models::{DailyRequirements, Recommendation, Targets, UserProfile};

/// Display daily requirements for a profile.
pub fn display_requirements(profile: &UserProfile, daily: &DailyRequirements) {
    println!();
    println!("=== Daily Requirements ===");
    println!();
    if let Ok(bmi) = profile.bmi() {
        println!("BMI:      {:.1}", bmi);
    }
    println!("Calories: {:.0} kcal", daily.calories);
    println!("Protein:  {:.1} g", daily.protein);
    println!("Fat:      {:.1} g", daily.fat);
    println!("Carbs:    {:.1} g", daily.carbs);
    println!();
}

/// Display one meal's targets.
pub fn display_targets(strategy: &str, targets: &Targets) {
    println!(
        "[{}] energy <= {:.1} kcal, protein >= {:.1} g, fat >= {:.1} g, carbs >= {:.1} g",
        strategy, targets.energy_ceiling, targets.protein_floor, targets.fat_floor, targets.carbs_floor
    );
}

/// Display recommended combinations with their totals.
pub fn display_recommendations(strategy: &str, results: &[Recommendation]) {
    if results.is_empty() {
        println!("No combinations found by {}.", strategy);
        println!();
        return;
    }

    println!();
    println!("=== {} ({} combinations) ===", strategy, results.len());
    println!();

    for (i, rec) in results.iter().enumerate() {
        let tag = if rec.best_effort { "  [best effort]" } else { "" };
        println!("{:>3}. {}{}", i + 1, rec.names().join(", "), tag);
        println!(
            "     {:.0} kcal | P {:.1} g | F {:.1} g | C {:.1} g",
            rec.totals.energy, rec.totals.protein, rec.totals.fat, rec.totals.carbs
        );
    }
    println!();
}

/// Display catalog categories with their food counts.
pub fn display_categories(categories: &BTreeMap<String, usize>) {
    if categories.is_empty() {
        println!("Categories: (none)");
        return;
    }

    println!();
    println!("=== Categories ({} total) ===", categories.len());
    println!();

    let width = categories.keys().map(|c| c.len()).max().unwrap_or(10);
    for (category, count) in categories {
        println!("  {:<width$}  {:>5}", category, count, width = width);
    }
    println!();
}

/// Display a benchmark comparison table.
pub fn display_reports(reports: &[StrategyReport], tolerance: f64) {
    println!();
    println!("=== Strategy Comparison (tolerance {:.0}%) ===", tolerance);
    println!();
    println!(
        "{:<14} {:>7} {:>11} {:>10} {:>10} {:>9}",
        "strategy", "found", "elapsed_s", "kcal_err%", "macro_err%", "strict%"
    );

    for report in reports {
        match &report.quality {
            Some(q) => println!(
                "{:<14} {:>7} {:>11.4} {:>10.2} {:>10.2} {:>9.2}",
                report.strategy,
                report.found,
                report.elapsed.as_secs_f64(),
                q.kcal_avg_error,
                q.macro_avg_error,
                q.strict_success_rate
            ),
            None => println!(
                "{:<14} {:>7} {:>11.4} {:>10} {:>10} {:>9}",
                report.strategy,
                report.found,
                report.elapsed.as_secs_f64(),
                "-",
                "-",
                "-"
            ),
        }
    }
    println!();
}
