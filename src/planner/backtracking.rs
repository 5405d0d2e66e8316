use std::time::Instant;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::data::{Catalog, FoodId};
use crate::models::{NutritionTotals, Recommendation, Targets};
use crate::planner::constants::*;
use crate::planner::registry::CombinationRegistry;
use crate::planner::targets::TargetPolicy;
use crate::planner::CombinationSearch;

/// Knobs for the bounded depth-first search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktrackingConfig {
    pub targets: TargetPolicy,
    /// Shuffle the catalog before ordering by preference.
    pub shuffle: bool,
    pub search_space: usize,
    pub max_steps: u64,
    pub max_items: usize,
    /// Skip a child outright when it would already break the ceiling.
    pub lookahead: bool,
}

impl Default for BacktrackingConfig {
    fn default() -> Self {
        Self {
            targets: TargetPolicy::backtracking(),
            shuffle: true,
            search_space: BACKTRACKING_SEARCH_SPACE,
            max_steps: BACKTRACKING_MAX_STEPS,
            max_items: BACKTRACKING_MAX_ITEMS,
            lookahead: true,
        }
    }
}

/// One level of the explicit DFS stack. Its menu is the shared path up to
/// this frame's depth.
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Next position in the search order to try as a child.
    next: usize,
    totals: NutritionTotals,
}

/// What happened when a node was visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    /// Over the ceiling or the length cap.
    Pruned,
    /// Floors met; recorded (if new) and not extended.
    Leaf,
    /// Still short on a floor; children should be explored.
    Expand,
    /// Step budget or requested count reached.
    Halt,
}

/// Mutable state of a single search invocation.
#[derive(Debug, Default)]
struct SearchState<'a> {
    steps: u64,
    registry: CombinationRegistry,
    results: Vec<Recommendation<'a>>,
}

/// Pruned exhaustive search over a bounded prefix of the catalog.
///
/// Energy and menu length only grow along a path, so pruning on either never
/// discards a valid completion. A node that meets every floor is reported and
/// treated as a leaf, so supersets of it are not listed separately.
#[derive(Debug, Clone, Default)]
pub struct BacktrackingSearch {
    pub config: BacktrackingConfig,
}

impl BacktrackingSearch {
    pub fn new(config: BacktrackingConfig) -> Self {
        Self { config }
    }

    /// Positive-energy foods, shuffled, preferred category first, truncated to
    /// the search space.
    fn search_order<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        preference: Option<&str>,
        rng: &mut R,
    ) -> Vec<FoodId> {
        let mut order: Vec<FoodId> = catalog
            .iter()
            .filter(|(_, food)| food.energy > 0.0)
            .map(|(id, _)| id)
            .collect();

        if self.config.shuffle {
            order.shuffle(rng);
        }
        if let Some(label) = preference {
            // Stable: keeps the shuffled order within each tier.
            order.sort_by_key(|&id| !catalog.get(id).in_category(label));
        }
        order.truncate(self.config.search_space);
        order
    }

    fn visit<'a>(
        &self,
        catalog: &'a Catalog,
        targets: &Targets,
        path: &[FoodId],
        totals: &NutritionTotals,
        count: usize,
        state: &mut SearchState<'a>,
    ) -> Visit {
        if state.results.len() >= count || state.steps >= self.config.max_steps {
            return Visit::Halt;
        }
        state.steps += 1;

        if totals.energy > targets.energy_ceiling || path.len() > self.config.max_items {
            return Visit::Pruned;
        }

        if !path.is_empty() && targets.floors_met(totals) {
            let rec = Recommendation::new(path.iter().map(|&id| catalog.get(id)).collect());
            if state.registry.insert(rec.signature()) {
                debug!(signature = %rec.signature(), steps = state.steps, "combination found");
                state.results.push(rec);
            }
            return Visit::Leaf;
        }

        // Every child of a full menu would exceed the length cap.
        if path.len() >= self.config.max_items {
            return Visit::Pruned;
        }
        Visit::Expand
    }

    /// Depth-first search over `order` with an explicit stack.
    fn search<'a>(
        &self,
        catalog: &'a Catalog,
        targets: &Targets,
        order: &[FoodId],
        count: usize,
    ) -> SearchState<'a> {
        let mut state = SearchState::default();
        let mut path: Vec<FoodId> = Vec::with_capacity(self.config.max_items + 1);
        let mut stack: Vec<Frame> = Vec::with_capacity(self.config.max_items + 1);

        let root = NutritionTotals::default();
        if self.visit(catalog, targets, &path, &root, count, &mut state) == Visit::Expand {
            stack.push(Frame { next: 0, totals: root });
        }

        while let Some(frame) = stack.last_mut() {
            let mut child = None;
            while frame.next < order.len() {
                let position = frame.next;
                frame.next += 1;

                let food = catalog.get(order[position]);
                if self.config.lookahead && frame.totals.energy + food.energy > targets.energy_ceiling {
                    continue;
                }
                child = Some((position, frame.totals + food));
                break;
            }

            let Some((position, totals)) = child else {
                // Children exhausted: backtrack. The root frame has no path entry.
                stack.pop();
                path.pop();
                continue;
            };

            path.push(order[position]);
            match self.visit(catalog, targets, &path, &totals, count, &mut state) {
                Visit::Expand => stack.push(Frame {
                    next: position + 1,
                    totals,
                }),
                Visit::Halt => break,
                Visit::Leaf | Visit::Pruned => {
                    path.pop();
                }
            }
        }

        state
    }
}

impl CombinationSearch for BacktrackingSearch {
    fn name(&self) -> &'static str {
        "backtracking"
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
        if catalog.is_empty() || count == 0 {
            return Vec::new();
        }

        let start = Instant::now();
        let order = self.search_order(catalog, preference, rng);
        let state = self.search(catalog, targets, &order, count);

        info!(
            strategy = self.name(),
            found = state.results.len(),
            requested = count,
            search_space = order.len(),
            steps = state.steps,
            step_limit_hit = state.steps >= self.config.max_steps,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "backtracking search finished"
        );
        state.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Food, Signature};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn abc_catalog() -> Catalog {
        Catalog::new(vec![
            Food::new("A", "Rice", 300.0, 20.0, 10.0, 30.0),
            Food::new("B", "Bread", 250.0, 15.0, 8.0, 40.0),
            Food::new("C", "Grilled", 200.0, 25.0, 5.0, 20.0),
        ])
    }

    fn ordered() -> BacktrackingSearch {
        BacktrackingSearch::new(BacktrackingConfig {
            shuffle: false,
            ..Default::default()
        })
    }

    fn signatures(results: &[Recommendation]) -> HashSet<Signature> {
        results.iter().map(|r| r.signature()).collect()
    }

    #[test]
    fn test_abc_pairs() {
        let catalog = abc_catalog();
        let targets = Targets::new(600.0, 30.0, 10.0, 40.0);
        let mut rng = StdRng::seed_from_u64(5);

        let results = BacktrackingSearch::default().find_combinations(&catalog, &targets, None, 5, &mut rng);

        let expected: HashSet<Signature> = [["a", "b"], ["a", "c"], ["b", "c"]]
            .iter()
            .map(|pair| {
                let foods: Vec<&Food> = pair
                    .iter()
                    .map(|name| catalog.get(catalog.find(name).unwrap()))
                    .collect();
                Signature::from_foods(&foods)
            })
            .collect();
        assert_eq!(signatures(&results), expected);

        let ab = results
            .iter()
            .find(|r| r.signature().to_string() == "a + b")
            .unwrap();
        assert_eq!(ab.totals.energy, 550.0);
        assert_eq!(ab.totals.protein, 35.0);
        assert_eq!(ab.totals.fat, 18.0);
        assert_eq!(ab.totals.carbs, 70.0);
    }

    #[test]
    fn test_stops_at_count() {
        let catalog = abc_catalog();
        let targets = Targets::new(600.0, 30.0, 10.0, 40.0);
        let mut rng = StdRng::seed_from_u64(5);

        let results = ordered().find_combinations(&catalog, &targets, None, 1, &mut rng);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_step_limit_halts_search() {
        let catalog = abc_catalog();
        let targets = Targets::new(600.0, 30.0, 10.0, 40.0);
        let search = BacktrackingSearch::new(BacktrackingConfig {
            shuffle: false,
            max_steps: 2,
            ..Default::default()
        });
        let order: Vec<FoodId> = catalog.ids().collect();

        let state = search.search(&catalog, &targets, &order, 10);
        assert_eq!(state.steps, 2);
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_preference_goes_first() {
        let catalog = abc_catalog();
        let mut rng = StdRng::seed_from_u64(9);
        let order = BacktrackingSearch::default().search_order(&catalog, Some("grilled"), &mut rng);
        assert_eq!(catalog.get(order[0]).name, "C");
    }

    #[test]
    fn test_order_skips_zero_energy_and_truncates() {
        let catalog = Catalog::new(vec![
            Food::new("Water", "Drink", 0.0, 0.0, 0.0, 0.0),
            Food::new("A", "Rice", 300.0, 20.0, 10.0, 30.0),
            Food::new("B", "Bread", 250.0, 15.0, 8.0, 40.0),
        ]);
        let search = BacktrackingSearch::new(BacktrackingConfig {
            shuffle: false,
            search_space: 1,
            ..Default::default()
        });
        let mut rng = StdRng::seed_from_u64(1);

        let order = search.search_order(&catalog, None, &mut rng);
        assert_eq!(order.len(), 1);
        assert_eq!(catalog.get(order[0]).name, "A");
    }

    #[test]
    fn test_max_items_cap() {
        // Each food carries a third of the protein floor: at least three needed.
        let catalog = Catalog::new(
            (0..5)
                .map(|i| Food::new(&format!("F{i}"), "Misc", 100.0, 10.0, 0.0, 0.0))
                .collect(),
        );
        let targets = Targets::new(1000.0, 30.0, 0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(2);

        let capped = BacktrackingSearch::new(BacktrackingConfig {
            max_items: 2,
            ..Default::default()
        });
        assert!(capped.find_combinations(&catalog, &targets, None, 5, &mut rng).is_empty());

        let results = ordered().find_combinations(&catalog, &targets, None, 100, &mut rng);
        assert_eq!(results.len(), 10); // C(5, 3)
        assert!(results.iter().all(|r| r.len() == 3));
    }
}
