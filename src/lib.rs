pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod evaluation;
pub mod interface;
pub mod models;
pub mod planner;

pub use config::RecommenderConfig;
pub use error::{MealError, Result};
pub use models::{Food, Recommendation};
