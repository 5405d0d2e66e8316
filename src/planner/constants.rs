/// Meals a day's requirements are split across.
pub const MEALS_PER_DAY: f64 = 3.0;

// ─────────────────────────────────────────────────────────────────────────────
// Per-meal target policies
// Each strategy loosens the same daily requirements differently.
// ─────────────────────────────────────────────────────────────────────────────

/// kcal a single meal may go above the naive daily third.
pub const GREEDY_ENERGY_OFFSET: f64 = 200.0;
/// Grams a meal may fall short on carbs.
pub const GREEDY_CARBS_SLACK: f64 = 50.0;

pub const GENETIC_ENERGY_OFFSET: f64 = 200.0;
pub const GENETIC_CARBS_SLACK: f64 = 50.0;

pub const BACKTRACKING_ENERGY_OFFSET: f64 = 200.0;
/// Backtracking scales every floor down to widen the feasible region.
pub const BACKTRACKING_LAXITY: f64 = 0.8;

/// Reference targets used when scoring results against the user's needs.
pub const REFERENCE_ENERGY_OFFSET: f64 = 200.0;

// ─────────────────────────────────────────────────────────────────────────────
// Greedy
// ─────────────────────────────────────────────────────────────────────────────

/// Construction attempts per requested combination.
pub const GREEDY_ATTEMPTS_PER_RESULT: usize = 10;

/// Probability of seeding an attempt from the preferred category.
pub const GREEDY_SEED_PREFERENCE_PROBABILITY: f64 = 0.7;

/// Score multiplier for foods in the preferred category.
pub const GREEDY_PREFERENCE_BONUS: f64 = 1.5;

/// Candidates kept for the score-weighted draw at each step.
pub const GREEDY_TOP_CANDIDATES: usize = 10;

// ─────────────────────────────────────────────────────────────────────────────
// Backtracking
// ─────────────────────────────────────────────────────────────────────────────

/// Only this many foods (after shuffling and preference ordering) are searched.
pub const BACKTRACKING_SEARCH_SPACE: usize = 2000;

/// Node visits before the whole search stops.
pub const BACKTRACKING_MAX_STEPS: u64 = 5_000_000;

/// Maximum foods in one combination.
pub const BACKTRACKING_MAX_ITEMS: usize = 6;

// ─────────────────────────────────────────────────────────────────────────────
// Genetic algorithm
// ─────────────────────────────────────────────────────────────────────────────

pub const GENETIC_POPULATION_SIZE: usize = 100;
pub const GENETIC_GENERATIONS: usize = 50;

/// Slots per individual.
pub const GENETIC_MAX_ITEMS: usize = 7;

/// Fewest foods in a freshly generated individual.
pub const GENETIC_MIN_INITIAL_ITEMS: usize = 3;

pub const GENETIC_TOURNAMENT_SIZE: usize = 5;
pub const GENETIC_CROSSOVER_RATE: f64 = 0.7;
pub const GENETIC_MUTATION_RATE: f64 = 0.3;

/// Share of each generation copied unchanged into the next.
pub const GENETIC_ELITE_FRACTION: f64 = 0.1;
pub const GENETIC_MIN_ELITE: usize = 2;

/// Share of each generation inspected for new results.
pub const GENETIC_HARVEST_FRACTION: f64 = 0.2;

/// Full evolutionary runs before giving up on reaching the requested count.
pub const GENETIC_MAX_RESTARTS: usize = 20;

/// Weight of the capped macro coverage (0..1) in fitness.
pub const GENETIC_COVERAGE_WEIGHT: f64 = 10.0;

/// Weight of energy utilization (0..1) in fitness.
pub const GENETIC_ENERGY_WEIGHT: f64 = 2.0;

/// Fitness per food in the preferred category.
pub const GENETIC_PREFERENCE_WEIGHT: f64 = 1.5;

/// Preferred combination size and the fitness cost per food away from it.
pub const GENETIC_IDEAL_ITEMS: usize = 5;
pub const GENETIC_SIZE_PENALTY: f64 = 0.5;

/// Negative fitness per unit of fractional energy overshoot.
pub const GENETIC_OVERSHOOT_PENALTY: f64 = 1000.0;

// ─────────────────────────────────────────────────────────────────────────────
// Evaluation
// ─────────────────────────────────────────────────────────────────────────────

/// Percent error allowed on every dimension for a "strict" success.
pub const DEFAULT_STRICT_TOLERANCE: f64 = 25.0;

/// Combinations requested per strategy when benchmarking.
pub const DEFAULT_BENCHMARK_COUNT: usize = 1000;
