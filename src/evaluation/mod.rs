pub mod harness;
pub mod metrics;
pub mod output;

pub use harness::{BenchmarkConfig, StrategyReport, run_benchmark};
pub use metrics::{QualityReport, evaluate_results, percent_error, reference_targets};
pub use output::{write_csv, write_json};
