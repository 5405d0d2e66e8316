pub mod food;
pub mod nutrition;
pub mod profile;
pub mod recommendation;

pub use food::{DEFAULT_CATEGORY, Food};
pub use nutrition::{NutritionTotals, Targets};
pub use profile::{ActivityLevel, DailyRequirements, DietPurpose, Sex, UserProfile};
pub use recommendation::{Recommendation, Signature};
