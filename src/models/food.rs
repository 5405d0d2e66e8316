use serde::{Deserialize, Serialize};

/// Category assigned to foods whose source row has none.
pub const DEFAULT_CATEGORY: &str = "Other";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// A catalog food with its per-serving nutritional data.
///
/// Foods are read-only once loaded; every search strategy borrows them from
/// the [`Catalog`](crate::data::Catalog).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Category", default = "default_category")]
    pub category: String,

    /// Energy in kcal.
    #[serde(rename = "Energy", default)]
    pub energy: f64,

    #[serde(rename = "Protein", default)]
    pub protein: f64,

    #[serde(rename = "Fat", default)]
    pub fat: f64,

    #[serde(rename = "Carbs", default)]
    pub carbs: f64,
}

impl Food {
    pub fn new(name: &str, category: &str, energy: f64, protein: f64, fat: f64, carbs: f64) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            energy,
            protein,
            fat,
            carbs,
        }
    }

    /// Whether this food belongs to the given category label (case-insensitive).
    #[inline]
    pub fn in_category(&self, label: &str) -> bool {
        self.category
            .chars()
            .flat_map(char::to_lowercase)
            .eq(label.chars().flat_map(char::to_lowercase))
    }

    /// Non-negative values everywhere and a non-blank name.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && self.energy >= 0.0
            && self.protein >= 0.0
            && self.fat >= 0.0
            && self.carbs >= 0.0
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} [{}]: {} kcal, P:{} F:{} C:{}",
            self.name, self.category, self.energy, self.protein, self.fat, self.carbs
        )
    }

    /// Canonical key for lookups and signatures (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

impl PartialEq for Food {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Food {}

impl std::hash::Hash for Food {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
