use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::models::Food;

/// Summed energy and macro-nutrients of a set of foods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub energy: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl NutritionTotals {
    /// Element-wise sum over the given foods.
    pub fn from_foods<'a, I>(foods: I) -> Self
    where
        I: IntoIterator<Item = &'a Food>,
    {
        foods.into_iter().fold(Self::default(), |acc, f| acc + f)
    }
}

impl Add<&Food> for NutritionTotals {
    type Output = NutritionTotals;

    fn add(self, food: &Food) -> Self::Output {
        Self {
            energy: self.energy + food.energy,
            protein: self.protein + food.protein,
            fat: self.fat + food.fat,
            carbs: self.carbs + food.carbs,
        }
    }
}

impl AddAssign<&Food> for NutritionTotals {
    fn add_assign(&mut self, food: &Food) {
        *self = *self + food;
    }
}

/// Per-meal constraint set: one energy ceiling and three macro floors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    pub energy_ceiling: f64,
    pub protein_floor: f64,
    pub fat_floor: f64,
    pub carbs_floor: f64,
}

/// Ratio of `value` to `floor`, with a non-positive floor counting as met.
#[inline]
fn floor_ratio(value: f64, floor: f64) -> f64 {
    if floor > 0.0 { value / floor } else { 1.0 }
}

impl Targets {
    pub fn new(energy_ceiling: f64, protein_floor: f64, fat_floor: f64, carbs_floor: f64) -> Self {
        Self {
            energy_ceiling,
            protein_floor,
            fat_floor,
            carbs_floor,
        }
    }

    #[inline]
    pub fn within_ceiling(&self, totals: &NutritionTotals) -> bool {
        totals.energy <= self.energy_ceiling
    }

    /// All three macro floors are met.
    #[inline]
    pub fn floors_met(&self, totals: &NutritionTotals) -> bool {
        totals.protein >= self.protein_floor
            && totals.fat >= self.fat_floor
            && totals.carbs >= self.carbs_floor
    }

    #[inline]
    pub fn is_satisfied_by(&self, totals: &NutritionTotals) -> bool {
        self.within_ceiling(totals) && self.floors_met(totals)
    }

    /// How much `food` contributes toward the floors still unmet by `totals`.
    ///
    /// Sum over unmet floors of `food value / floor`. A floor that is already
    /// met (including a zero floor) contributes nothing.
    pub fn deficit_score(&self, totals: &NutritionTotals, food: &Food) -> f64 {
        let mut score = 0.0;
        if totals.protein < self.protein_floor {
            score += food.protein / self.protein_floor;
        }
        if totals.fat < self.fat_floor {
            score += food.fat / self.fat_floor;
        }
        if totals.carbs < self.carbs_floor {
            score += food.carbs / self.carbs_floor;
        }
        score
    }

    /// Mean of the three floor ratios, each capped at 1.0.
    pub fn coverage(&self, totals: &NutritionTotals) -> f64 {
        let protein = floor_ratio(totals.protein, self.protein_floor).min(1.0);
        let fat = floor_ratio(totals.fat, self.fat_floor).min(1.0);
        let carbs = floor_ratio(totals.carbs, self.carbs_floor).min(1.0);
        (protein + fat + carbs) / 3.0
    }

    /// Fraction of the energy ceiling used; 0 for a non-positive ceiling.
    pub fn energy_utilization(&self, totals: &NutritionTotals) -> f64 {
        if self.energy_ceiling > 0.0 {
            totals.energy / self.energy_ceiling
        } else {
            0.0
        }
    }

    /// Fractional overshoot above the ceiling, 0 when within it.
    pub fn energy_overshoot(&self, totals: &NutritionTotals) -> f64 {
        let excess = (totals.energy - self.energy_ceiling).max(0.0);
        if self.energy_ceiling > 0.0 {
            excess / self.energy_ceiling
        } else {
            excess
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_foods() -> Vec<Food> {
        vec![
            Food::new("A", "Rice", 300.0, 20.0, 10.0, 30.0),
            Food::new("B", "Bread", 250.0, 15.0, 8.0, 40.0),
        ]
    }

    #[test]
    fn test_from_foods_sums_elementwise() {
        let foods = sample_foods();
        let totals = NutritionTotals::from_foods(&foods);
        assert_eq!(totals.energy, 550.0);
        assert_eq!(totals.protein, 35.0);
        assert_eq!(totals.fat, 18.0);
        assert_eq!(totals.carbs, 70.0);
    }

    #[test]
    fn test_floors_and_ceiling() {
        let targets = Targets::new(600.0, 30.0, 10.0, 40.0);
        let totals = NutritionTotals::from_foods(&sample_foods());
        assert!(targets.is_satisfied_by(&totals));

        let tight = Targets::new(500.0, 30.0, 10.0, 40.0);
        assert!(tight.floors_met(&totals));
        assert!(!tight.within_ceiling(&totals));
    }

    #[test]
    fn test_zero_floor_is_already_satisfied() {
        let targets = Targets::new(600.0, 0.0, 0.0, 0.0);
        let totals = NutritionTotals::default();
        assert!(targets.floors_met(&totals));
        assert_eq!(targets.coverage(&totals), 1.0);

        let food = Food::new("A", "Rice", 300.0, 20.0, 10.0, 30.0);
        assert_eq!(targets.deficit_score(&totals, &food), 0.0);
    }

    #[test]
    fn test_deficit_score_ignores_met_floors() {
        let targets = Targets::new(600.0, 10.0, 10.0, 40.0);
        let totals = NutritionTotals {
            energy: 100.0,
            protein: 12.0,
            fat: 0.0,
            carbs: 0.0,
        };
        let food = Food::new("A", "Rice", 300.0, 20.0, 5.0, 20.0);
        // protein already met: 5/10 + 20/40
        assert!((targets.deficit_score(&totals, &food) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_coverage_caps_each_macro() {
        let targets = Targets::new(600.0, 10.0, 10.0, 10.0);
        let totals = NutritionTotals {
            energy: 300.0,
            protein: 100.0,
            fat: 0.0,
            carbs: 5.0,
        };
        assert!((targets.coverage(&totals) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_energy_overshoot() {
        let targets = Targets::new(500.0, 0.0, 0.0, 0.0);
        let over = NutritionTotals {
            energy: 600.0,
            ..Default::default()
        };
        assert!((targets.energy_overshoot(&over) - 0.2).abs() < 1e-9);
        assert_eq!(targets.energy_overshoot(&NutritionTotals::default()), 0.0);
    }
}
