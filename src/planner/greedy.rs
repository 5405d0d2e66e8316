use std::time::Instant;

use rand::Rng;
use rand::seq::{IteratorRandom, SliceRandom};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::data::{Catalog, FoodId};
use crate::models::{NutritionTotals, Recommendation, Targets};
use crate::planner::constants::*;
use crate::planner::registry::CombinationRegistry;
use crate::planner::targets::TargetPolicy;
use crate::planner::CombinationSearch;

/// Knobs for randomized greedy construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GreedyConfig {
    pub targets: TargetPolicy,
    pub attempts_per_result: usize,
    pub seed_preference_probability: f64,
    pub preference_bonus: f64,
    pub top_candidates: usize,
}

impl Default for GreedyConfig {
    fn default() -> Self {
        Self {
            targets: TargetPolicy::greedy(),
            attempts_per_result: GREEDY_ATTEMPTS_PER_RESULT,
            seed_preference_probability: GREEDY_SEED_PREFERENCE_PROBABILITY,
            preference_bonus: GREEDY_PREFERENCE_BONUS,
            top_candidates: GREEDY_TOP_CANDIDATES,
        }
    }
}

/// A food that fits under the ceiling, with its greedy score.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    id: FoodId,
    score: f64,
}

/// Randomized greedy search.
///
/// Each attempt seeds a meal with one food and keeps adding the food that best
/// fills the still-unmet floors, drawn at random from the top-scoring few so
/// repeated attempts diverge.
#[derive(Debug, Clone, Default)]
pub struct GreedySearch {
    pub config: GreedyConfig,
}

impl GreedySearch {
    pub fn new(config: GreedyConfig) -> Self {
        Self { config }
    }

    /// Score every unchosen food that keeps the meal under the ceiling.
    fn candidates(
        &self,
        catalog: &Catalog,
        targets: &Targets,
        totals: &NutritionTotals,
        chosen: &[bool],
        preference: Option<&str>,
    ) -> Vec<Candidate> {
        catalog
            .iter()
            .filter(|(id, food)| {
                !chosen[id.index()] && totals.energy + food.energy <= targets.energy_ceiling
            })
            .filter_map(|(id, food)| {
                let mut score = targets.deficit_score(totals, food);
                if preference.is_some_and(|p| food.in_category(p)) {
                    score *= self.config.preference_bonus;
                }
                (score > 0.0).then_some(Candidate { id, score })
            })
            .collect()
    }

    /// Build one combination starting from `seed`.
    ///
    /// Returns `None` when the seed alone breaks the ceiling or the floors
    /// cannot be met before candidates run out.
    fn construct<'a, R: Rng + ?Sized>(
        &self,
        catalog: &'a Catalog,
        targets: &Targets,
        preference: Option<&str>,
        seed: FoodId,
        rng: &mut R,
    ) -> Option<Recommendation<'a>> {
        let first = catalog.get(seed);
        if first.energy > targets.energy_ceiling {
            return None;
        }

        let mut chosen = vec![false; catalog.len()];
        chosen[seed.index()] = true;
        let mut selected = vec![first];
        let mut totals = NutritionTotals::default() + first;

        while !targets.floors_met(&totals) {
            let mut candidates = self.candidates(catalog, targets, &totals, &chosen, preference);
            if candidates.is_empty() {
                return None;
            }

            candidates.sort_by(|a, b| {
                b.score
                    .partial_cmp(&a.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            candidates.truncate(self.config.top_candidates.max(1));

            let picked = candidates
                .choose_weighted(rng, |c| c.score)
                .map(|c| c.id)
                .unwrap_or(candidates[0].id);

            let food = catalog.get(picked);
            chosen[picked.index()] = true;
            selected.push(food);
            totals += food;
        }

        Some(Recommendation::new(selected))
    }

    /// Seed from the preferred category with fixed probability, otherwise
    /// uniformly from the whole catalog.
    fn pick_seed<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        preferred: &[FoodId],
        rng: &mut R,
    ) -> Option<FoodId> {
        let probability = self.config.seed_preference_probability.clamp(0.0, 1.0);
        if !preferred.is_empty() && rng.gen_bool(probability) {
            return preferred.choose(rng).copied();
        }
        catalog.ids().choose(rng)
    }
}

impl CombinationSearch for GreedySearch {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn target_policy(&self) -> &TargetPolicy {
        &self.config.targets
    }

    fn find_combinations<'a, R: Rng + ?Sized>(
        &self,
        catalog: &'a Catalog,
        targets: &Targets,
        preference: Option<&str>,
        count: usize,
        rng: &mut R,
    ) -> Vec<Recommendation<'a>> {
        let mut results = Vec::new();
        if catalog.is_empty() || count == 0 {
            return results;
        }

        let start = Instant::now();
        let preferred = preference
            .map(|p| catalog.ids_in_category(p))
            .unwrap_or_default();
        let mut registry = CombinationRegistry::new();
        let max_attempts = count.saturating_mul(self.config.attempts_per_result.max(1));

        let mut attempts = 0;
        while attempts < max_attempts && results.len() < count {
            attempts += 1;
            let Some(seed) = self.pick_seed(catalog, &preferred, rng) else {
                break;
            };

            match self.construct(catalog, targets, preference, seed, rng) {
                Some(rec) if registry.insert(rec.signature()) => results.push(rec),
                Some(rec) => debug!(attempt = attempts, signature = %rec.signature(), "duplicate combination"),
                None => debug!(attempt = attempts, seed = %catalog.get(seed).name, "attempt abandoned"),
            }
        }

        info!(
            strategy = self.name(),
            found = results.len(),
            requested = count,
            attempts,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "greedy search finished"
        );
        results
    }
}
