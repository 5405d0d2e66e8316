use serde::Serialize;

use crate::models::{DailyRequirements, NutritionTotals, Recommendation};
use crate::planner::constants::{MEALS_PER_DAY, REFERENCE_ENERGY_OFFSET};

/// Aggregate quality of a strategy's results against reference targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityReport {
    /// Mean energy error, percent.
    pub kcal_avg_error: f64,
    /// Mean over results of the mean protein/fat/carbs error, percent.
    pub macro_avg_error: f64,
    /// Share of results within tolerance on all four dimensions, percent.
    pub strict_success_rate: f64,
}

/// Absolute percentage error. A zero target scores 0 for a zero actual and
/// 100 otherwise.
pub fn percent_error(actual: f64, target: f64) -> f64 {
    if target == 0.0 {
        return if actual == 0.0 { 0.0 } else { 100.0 };
    }
    (actual - target).abs() / target.abs() * 100.0
}

/// Per-meal values results are scored against: calories per meal plus the
/// usual offset, and plain per-meal macros.
pub fn reference_targets(daily: &DailyRequirements) -> NutritionTotals {
    NutritionTotals {
        energy: daily.calories / MEALS_PER_DAY + REFERENCE_ENERGY_OFFSET,
        protein: daily.protein / MEALS_PER_DAY,
        fat: daily.fat / MEALS_PER_DAY,
        carbs: daily.carbs / MEALS_PER_DAY,
    }
}

/// Score results against reference targets. `None` for an empty result set.
pub fn evaluate_results(
    results: &[Recommendation],
    reference: &NutritionTotals,
    tolerance: f64,
) -> Option<QualityReport> {
    if results.is_empty() {
        return None;
    }

    let mut kcal_total = 0.0;
    let mut macro_total = 0.0;
    let mut strict = 0usize;

    for rec in results {
        let kcal = percent_error(rec.totals.energy, reference.energy);
        let protein = percent_error(rec.totals.protein, reference.protein);
        let fat = percent_error(rec.totals.fat, reference.fat);
        let carbs = percent_error(rec.totals.carbs, reference.carbs);

        kcal_total += kcal;
        macro_total += (protein + fat + carbs) / 3.0;
        if [kcal, protein, fat, carbs].iter().all(|e| *e <= tolerance) {
            strict += 1;
        }
    }

    let n = results.len() as f64;
    Some(QualityReport {
        kcal_avg_error: kcal_total / n,
        macro_avg_error: macro_total / n,
        strict_success_rate: strict as f64 / n * 100.0,
    })
}
