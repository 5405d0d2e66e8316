mod catalog;
mod persistence;

pub use catalog::{Catalog, FoodId};
pub use persistence::{load_catalog, load_config, load_profile};
