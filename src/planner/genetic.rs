use std::collections::{HashMap, HashSet};
use std::time::Instant;

use rand::Rng;
use rand::seq::{IteratorRandom, index};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::data::{Catalog, FoodId};
use crate::models::{Food, NutritionTotals, Recommendation, Targets};
use crate::planner::constants::*;
use crate::planner::registry::CombinationRegistry;
use crate::planner::targets::TargetPolicy;
use crate::planner::CombinationSearch;

/// Knobs for the evolutionary search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    pub targets: TargetPolicy,
    pub population_size: usize,
    pub generations: usize,

    /// Chromosome length; also the most foods one meal can hold.
    pub max_items: usize,
    pub min_initial_items: usize,

    pub tournament_size: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub elite_fraction: f64,
    pub min_elite: usize,
    pub harvest_fraction: f64,
    pub max_restarts: usize,

    // Fitness weights
    pub coverage_weight: f64,
    pub energy_weight: f64,
    pub preference_weight: f64,
    pub ideal_items: usize,
    pub size_penalty: f64,
    pub overshoot_penalty: f64,

    /// Emit in-ceiling individuals that miss a floor, flagged as best effort.
    pub accept_best_effort: bool,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            targets: TargetPolicy::genetic(),
            population_size: GENETIC_POPULATION_SIZE,
            generations: GENETIC_GENERATIONS,
            max_items: GENETIC_MAX_ITEMS,
            min_initial_items: GENETIC_MIN_INITIAL_ITEMS,
            tournament_size: GENETIC_TOURNAMENT_SIZE,
            crossover_rate: GENETIC_CROSSOVER_RATE,
            mutation_rate: GENETIC_MUTATION_RATE,
            elite_fraction: GENETIC_ELITE_FRACTION,
            min_elite: GENETIC_MIN_ELITE,
            harvest_fraction: GENETIC_HARVEST_FRACTION,
            max_restarts: GENETIC_MAX_RESTARTS,
            coverage_weight: GENETIC_COVERAGE_WEIGHT,
            energy_weight: GENETIC_ENERGY_WEIGHT,
            preference_weight: GENETIC_PREFERENCE_WEIGHT,
            ideal_items: GENETIC_IDEAL_ITEMS,
            size_penalty: GENETIC_SIZE_PENALTY,
            overshoot_penalty: GENETIC_OVERSHOOT_PENALTY,
            accept_best_effort: false,
        }
    }
}

impl GeneticConfig {
    pub fn with_population(population_size: usize, generations: usize) -> Self {
        Self {
            population_size,
            generations,
            ..Self::default()
        }
    }
}

/// Fixed-length slot array; `None` marks an empty slot.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Chromosome {
    genes: Vec<Option<FoodId>>,
}

impl Chromosome {
    fn random<R: Rng + ?Sized>(catalog: &Catalog, length: usize, min_items: usize, rng: &mut R) -> Self {
        let upper = length.min(catalog.len());
        let lower = min_items.min(upper);
        let n = if upper == 0 { 0 } else { rng.gen_range(lower..=upper) };

        let mut genes: Vec<Option<FoodId>> = index::sample(rng, catalog.len(), n)
            .into_iter()
            .map(|i| catalog.id_at(i))
            .collect();
        genes.resize(length, None);
        Self { genes }
    }

    fn members(&self) -> impl Iterator<Item = FoodId> + '_ {
        self.genes.iter().flatten().copied()
    }

    fn contains(&self, id: FoodId) -> bool {
        self.genes.contains(&Some(id))
    }

    /// Sorted member indices; the individual's identity inside one search.
    fn index_signature(&self) -> Vec<usize> {
        let mut sig: Vec<usize> = self.members().map(FoodId::index).collect();
        sig.sort_unstable();
        sig
    }

    /// Drop repeated foods keeping first occurrences in order, then pad
    /// with empty slots back to `length`.
    fn compact(&mut self, length: usize) {
        let mut seen = HashSet::new();
        let mut genes: Vec<Option<FoodId>> = self
            .genes
            .iter()
            .filter(|gene| match gene {
                Some(id) => seen.insert(*id),
                None => true,
            })
            .copied()
            .collect();
        genes.resize(length, None);
        self.genes = genes;
    }
}

/// An individual and its fitness.
#[derive(Debug, Clone)]
struct Scored {
    chromosome: Chromosome,
    fitness: f64,
}

/// Harvested individuals keyed by index signature, across restarts.
type Harvest = HashMap<Vec<usize>, Scored>;

/// Evolutionary search with an outer restart loop.
///
/// Each pass evolves a fresh random population for a fixed number of
/// generations, collecting the best individuals of every generation.
/// Passes repeat until enough distinct combinations are collected or the
/// restart budget is spent.
#[derive(Debug, Clone, Default)]
pub struct GeneticSearch {
    pub config: GeneticConfig,
}

impl GeneticSearch {
    pub fn new(config: GeneticConfig) -> Self {
        Self { config }
    }

    fn foods<'a>(catalog: &'a Catalog, chromosome: &Chromosome) -> Vec<&'a Food> {
        chromosome.members().map(|id| catalog.get(id)).collect()
    }

    /// Higher is better. Negative only when the ceiling is exceeded.
    fn fitness(&self, catalog: &Catalog, targets: &Targets, preference: Option<&str>, chromosome: &Chromosome) -> f64 {
        let foods = Self::foods(catalog, chromosome);
        if foods.is_empty() {
            return 0.0;
        }

        let totals = NutritionTotals::from_foods(foods.iter().copied());
        if !targets.within_ceiling(&totals) {
            return -self.config.overshoot_penalty * targets.energy_overshoot(&totals);
        }

        let preferred = preference.map_or(0, |p| foods.iter().filter(|f| f.in_category(p)).count());
        let size_gap = (foods.len() as f64 - self.config.ideal_items as f64).abs();

        let score = self.config.coverage_weight * targets.coverage(&totals)
            + self.config.energy_weight * targets.energy_utilization(&totals)
            + self.config.preference_weight * preferred as f64
            - self.config.size_penalty * size_gap;
        score.max(0.0)
    }

    /// Best of a with-replacement sample. `ranked` is sorted best first, so
    /// the lowest sampled position wins.
    fn tournament<'p, R: Rng + ?Sized>(&self, ranked: &'p [Scored], rng: &mut R) -> &'p Chromosome {
        let winner = (0..self.config.tournament_size.max(1))
            .map(|_| rng.gen_range(0..ranked.len()))
            .min()
            .unwrap_or(0);
        &ranked[winner].chromosome
    }

    /// Single-point crossover; children are compacted to stay duplicate free.
    fn crossover<R: Rng + ?Sized>(&self, a: &Chromosome, b: &Chromosome, rng: &mut R) -> (Chromosome, Chromosome) {
        let length = a.genes.len().min(b.genes.len());
        if length < 2 {
            return (a.clone(), b.clone());
        }

        let point = rng.gen_range(1..length);
        let mut first = Chromosome {
            genes: [&a.genes[..point], &b.genes[point..length]].concat(),
        };
        let mut second = Chromosome {
            genes: [&b.genes[..point], &a.genes[point..length]].concat(),
        };
        first.compact(self.config.max_items);
        second.compact(self.config.max_items);
        (first, second)
    }

    /// One of add, remove or replace with equal odds. Never introduces a
    /// food that is already present.
    fn mutate<R: Rng + ?Sized>(&self, catalog: &Catalog, chromosome: &mut Chromosome, rng: &mut R) {
        let fresh = catalog.ids().choose(rng).filter(|&id| !chromosome.contains(id));
        let occupied = chromosome
            .genes
            .iter()
            .enumerate()
            .filter(|(_, gene)| gene.is_some())
            .map(|(slot, _)| slot);

        match rng.gen_range(0..3) {
            0 => {
                if let (Some(slot), Some(id)) = (chromosome.genes.iter().position(Option::is_none), fresh) {
                    chromosome.genes[slot] = Some(id);
                }
            }
            1 => {
                if let Some(slot) = occupied.choose(rng) {
                    chromosome.genes[slot] = None;
                }
            }
            _ => {
                if let (Some(slot), Some(id)) = (occupied.choose(rng), fresh) {
                    chromosome.genes[slot] = Some(id);
                }
            }
        }
    }

    /// Whether an individual may be emitted.
    fn emittable(&self, catalog: &Catalog, targets: &Targets, scored: &Scored) -> bool {
        if scored.fitness <= 0.0 {
            return false;
        }
        let totals = NutritionTotals::from_foods(Self::foods(catalog, &scored.chromosome));
        targets.within_ceiling(&totals) && (self.config.accept_best_effort || targets.floors_met(&totals))
    }

    /// One full evolutionary pass from a fresh population.
    fn evolve<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        targets: &Targets,
        preference: Option<&str>,
        harvest: &mut Harvest,
        rng: &mut R,
    ) {
        let size = self.config.population_size;
        let length = self.config.max_items;
        let elite = ((size as f64 * self.config.elite_fraction) as usize)
            .max(self.config.min_elite)
            .min(size);
        let harvest_top = ((size as f64 * self.config.harvest_fraction).ceil() as usize).max(1);

        let mut population: Vec<Chromosome> = (0..size)
            .map(|_| Chromosome::random(catalog, length, self.config.min_initial_items, rng))
            .collect();

        for generation in 0..self.config.generations {
            let mut ranked: Vec<Scored> = population
                .into_iter()
                .map(|chromosome| Scored {
                    fitness: self.fitness(catalog, targets, preference, &chromosome),
                    chromosome,
                })
                .collect();
            ranked.sort_by(|a, b| {
                b.fitness
                    .partial_cmp(&a.fitness)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            for scored in ranked.iter().take(harvest_top) {
                if self.emittable(catalog, targets, scored) {
                    harvest
                        .entry(scored.chromosome.index_signature())
                        .or_insert_with(|| scored.clone());
                }
            }
            debug!(
                generation,
                best_fitness = ranked.first().map_or(0.0, |s| s.fitness),
                harvested = harvest.len(),
                "generation scored"
            );

            let mut next: Vec<Chromosome> = ranked.iter().take(elite).map(|s| s.chromosome.clone()).collect();
            while next.len() < size {
                let a = self.tournament(&ranked, rng);
                let b = self.tournament(&ranked, rng);
                let (first, second) = if rng.gen_bool(self.config.crossover_rate.clamp(0.0, 1.0)) {
                    self.crossover(a, b, rng)
                } else {
                    (a.clone(), b.clone())
                };

                for mut child in [first, second] {
                    if next.len() >= size {
                        break;
                    }
                    if rng.gen_bool(self.config.mutation_rate.clamp(0.0, 1.0)) {
                        self.mutate(catalog, &mut child, rng);
                    }
                    next.push(child);
                }
            }
            population = next;
        }
    }
}

impl CombinationSearch for GeneticSearch {
    fn name(&self) -> &'static str {
        "genetic"
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
        if catalog.is_empty() || count == 0 || self.config.population_size == 0 || self.config.max_items == 0 {
            return Vec::new();
        }

        let start = Instant::now();
        let mut harvest = Harvest::new();
        let mut passes = 0;
        while passes < self.config.max_restarts.max(1) && harvest.len() < count {
            passes += 1;
            self.evolve(catalog, targets, preference, &mut harvest, rng);
            debug!(pass = passes, harvested = harvest.len(), "evolution pass finished");
        }

        let mut best: Vec<Scored> = harvest.into_values().collect();
        best.sort_by(|a, b| {
            b.fitness
                .partial_cmp(&a.fitness)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut registry = CombinationRegistry::new();
        let mut results = Vec::with_capacity(count.min(best.len()));
        for scored in best {
            if results.len() >= count {
                break;
            }
            let foods = Self::foods(catalog, &scored.chromosome);
            let rec = Recommendation::new(foods);
            if !registry.insert(rec.signature()) {
                continue;
            }
            if targets.floors_met(&rec.totals) {
                results.push(rec);
            } else {
                results.push(Recommendation::best_effort(rec.foods));
            }
        }

        info!(
            strategy = self.name(),
            found = results.len(),
            requested = count,
            passes,
            population = self.config.population_size,
            generations = self.config.generations,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "genetic search finished"
        );
        results
    }
}
