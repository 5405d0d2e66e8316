use serde::{Deserialize, Serialize};

use crate::models::{DailyRequirements, Targets};
use crate::planner::constants::*;

/// How daily requirements are turned into one meal's targets.
///
/// Ceiling = calories / meals + offset. Each floor = daily / meals × laxity,
/// and carbs additionally drop by a fixed slack. Floors never go below zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetPolicy {
    pub meals_per_day: f64,
    pub energy_offset: f64,
    pub protein_laxity: f64,
    pub fat_laxity: f64,
    pub carbs_laxity: f64,
    pub carbs_slack: f64,
}

impl Default for TargetPolicy {
    fn default() -> Self {
        Self::reference()
    }
}

impl TargetPolicy {
    /// The user's plain per-meal needs: no laxity and no slack.
    pub fn reference() -> Self {
        Self {
            meals_per_day: MEALS_PER_DAY,
            energy_offset: REFERENCE_ENERGY_OFFSET,
            protein_laxity: 1.0,
            fat_laxity: 1.0,
            carbs_laxity: 1.0,
            carbs_slack: 0.0,
        }
    }

    pub fn greedy() -> Self {
        Self {
            energy_offset: GREEDY_ENERGY_OFFSET,
            carbs_slack: GREEDY_CARBS_SLACK,
            ..Self::reference()
        }
    }

    pub fn genetic() -> Self {
        Self {
            energy_offset: GENETIC_ENERGY_OFFSET,
            carbs_slack: GENETIC_CARBS_SLACK,
            ..Self::reference()
        }
    }

    pub fn backtracking() -> Self {
        Self {
            energy_offset: BACKTRACKING_ENERGY_OFFSET,
            protein_laxity: BACKTRACKING_LAXITY,
            fat_laxity: BACKTRACKING_LAXITY,
            carbs_laxity: BACKTRACKING_LAXITY,
            ..Self::reference()
        }
    }

    /// Derive one meal's targets. Pure: same inputs, same output.
    pub fn derive(&self, daily: &DailyRequirements) -> Targets {
        let meals = if self.meals_per_day > 0.0 {
            self.meals_per_day
        } else {
            MEALS_PER_DAY
        };

        Targets {
            energy_ceiling: daily.calories / meals + self.energy_offset,
            protein_floor: (daily.protein / meals * self.protein_laxity).max(0.0),
            fat_floor: (daily.fat / meals * self.fat_laxity).max(0.0),
            carbs_floor: (daily.carbs / meals * self.carbs_laxity - self.carbs_slack).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_daily() -> DailyRequirements {
        DailyRequirements {
            calories: 2400.0,
            carbs: 300.0,
            protein: 120.0,
            fat: 66.0,
        }
    }

    #[test]
    fn test_reference_targets() {
        let targets = TargetPolicy::reference().derive(&sample_daily());
        assert_eq!(targets.energy_ceiling, 1000.0);
        assert_eq!(targets.protein_floor, 40.0);
        assert_eq!(targets.fat_floor, 22.0);
        assert_eq!(targets.carbs_floor, 100.0);
    }

    #[test]
    fn test_greedy_carbs_slack() {
        let targets = TargetPolicy::greedy().derive(&sample_daily());
        assert_eq!(targets.carbs_floor, 50.0);
        assert_eq!(targets.protein_floor, 40.0);
    }

    #[test]
    fn test_backtracking_laxity() {
        let targets = TargetPolicy::backtracking().derive(&sample_daily());
        assert!((targets.protein_floor - 32.0).abs() < 1e-9);
        assert!((targets.carbs_floor - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_floors_never_negative() {
        let daily = DailyRequirements {
            calories: 600.0,
            carbs: 30.0,
            protein: 0.0,
            fat: 0.0,
        };
        let targets = TargetPolicy::greedy().derive(&daily);
        assert_eq!(targets.carbs_floor, 0.0);
        assert_eq!(targets.protein_floor, 0.0);
    }

    #[test]
    fn test_zero_meals_falls_back() {
        let policy = TargetPolicy {
            meals_per_day: 0.0,
            ..TargetPolicy::reference()
        };
        assert_eq!(
            policy.derive(&sample_daily()),
            TargetPolicy::reference().derive(&sample_daily())
        );
    }
}
