pub mod prompts;
pub mod render;

pub use prompts::{fuzzy_categories, prompt_preferences, prompt_profile};
pub use render::{
    display_categories, display_recommendations, display_reports, display_requirements,
    display_targets,
};
