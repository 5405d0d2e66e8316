use serde::{Deserialize, Serialize};

use crate::planner::{BacktrackingConfig, GeneticConfig, GreedyConfig, TargetPolicy};

/// Tuning for every strategy, loadable from a JSON file.
///
/// Missing sections and fields fall back to their defaults, so a file only
/// needs the values it overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    pub greedy: GreedyConfig,
    pub backtracking: BacktrackingConfig,
    pub genetic: GeneticConfig,
}

impl RecommenderConfig {
    /// Same config with one target policy applied to all strategies.
    pub fn with_shared_targets(mut self, policy: TargetPolicy) -> Self {
        self.greedy.targets = policy;
        self.backtracking.targets = policy;
        self.genetic.targets = policy;
        self
    }
}
