use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::config::RecommenderConfig;
use crate::data::Catalog;
use crate::error::{MealError, Result};
use crate::models::{DEFAULT_CATEGORY, Food, UserProfile};

/// One CSV row. Blank or non-numeric cells read as missing.
#[derive(Debug, Deserialize)]
struct FoodRecord {
    #[serde(rename = "Name")]
    name: String,

    #[serde(rename = "Category", default)]
    category: Option<String>,

    #[serde(rename = "Energy", default, deserialize_with = "csv::invalid_option")]
    energy: Option<f64>,

    #[serde(rename = "Protein", default, deserialize_with = "csv::invalid_option")]
    protein: Option<f64>,

    #[serde(rename = "Fat", default, deserialize_with = "csv::invalid_option")]
    fat: Option<f64>,

    #[serde(rename = "Carbs", default, deserialize_with = "csv::invalid_option")]
    carbs: Option<f64>,
}

impl From<FoodRecord> for Food {
    fn from(record: FoodRecord) -> Self {
        let category = record
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        Food {
            name: record.name.trim().to_string(),
            category,
            energy: record.energy.unwrap_or(0.0),
            protein: record.protein.unwrap_or(0.0),
            fat: record.fat.unwrap_or(0.0),
            carbs: record.carbs.unwrap_or(0.0),
        }
    }
}

fn unavailable(path: &Path, reason: impl ToString) -> MealError {
    MealError::CatalogUnavailable {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

fn read_csv_foods(path: &Path) -> Result<Vec<Food>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| unavailable(path, e))?;

    let mut foods = Vec::new();
    for record in reader.deserialize::<FoodRecord>() {
        let record = record.map_err(|e| unavailable(path, e))?;
        foods.push(Food::from(record));
    }
    Ok(foods)
}

fn read_json_foods(path: &Path) -> Result<Vec<Food>> {
    let content = fs::read_to_string(path).map_err(|e| unavailable(path, e))?;
    serde_json::from_str(&content).map_err(|e| unavailable(path, e))
}

/// Load the food catalog from a CSV (default) or `.json` file.
///
/// Rows with non-positive energy or negative values are dropped. Any read or
/// parse failure is reported as [`MealError::CatalogUnavailable`].
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let raw = if is_json {
        read_json_foods(path)?
    } else {
        read_csv_foods(path)?
    };

    let total = raw.len();
    let foods: Vec<Food> = raw
        .into_iter()
        .filter(|f| {
            let keep = f.is_valid() && f.energy > 0.0;
            if !keep {
                warn!(food = %f.debug_string(), "skipping unusable catalog row");
            }
            keep
        })
        .collect();

    let catalog = Catalog::new(foods);
    info!(
        path = %path.display(),
        rows = total,
        usable = catalog.len(),
        "loaded food catalog"
    );

    if catalog.is_empty() {
        return Err(MealError::EmptyCatalog);
    }
    Ok(catalog)
}

/// Load a user profile from a JSON file and validate it.
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<UserProfile> {
    let content = fs::read_to_string(path)?;
    let profile: UserProfile = serde_json::from_str(&content)?;
    profile.validate()?;
    Ok(profile)
}

/// Load strategy configuration from a JSON file. Missing fields use defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RecommenderConfig> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn test_load_csv_catalog() {
        let csv = "Name,Category,Energy,Protein,Fat,Carbs\n\
                   Rice,Rice,300,6,1,65\n\
                   Bulgogi,,400,30,18,20\n\
                   Water,Drink,0,0,0,0\n\
                   Soup,Soup,120,,3,n/a\n";

        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(csv.as_bytes()).unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 3);

        let bulgogi = catalog.find("bulgogi").unwrap();
        assert_eq!(catalog[bulgogi].category, DEFAULT_CATEGORY);

        let soup = catalog.find("soup").unwrap();
        assert_eq!(catalog[soup].protein, 0.0);
        assert_eq!(catalog[soup].carbs, 0.0);
        assert!(catalog.find("water").is_none());
    }

    #[test]
    fn test_load_json_catalog() {
        let json = r#"[
            {"Name": "Rice", "Category": "Rice", "Energy": 300, "Protein": 6, "Fat": 1, "Carbs": 65},
            {"Name": "rice", "Category": "Rice", "Energy": 310, "Protein": 6, "Fat": 1, "Carbs": 66}
        ]"#;

        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.foods()[0].energy, 300.0);
    }

    #[test]
    fn test_missing_catalog_is_unavailable() {
        let err = load_catalog("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, MealError::CatalogUnavailable { .. }));
    }

    #[test]
    fn test_all_rows_filtered_is_empty_catalog() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"Name,Category,Energy,Protein,Fat,Carbs\nWater,Drink,0,0,0,0\n")
            .unwrap();

        let err = load_catalog(file.path()).unwrap_err();
        assert!(matches!(err, MealError::EmptyCatalog));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"greedy": {"top_candidates": 3}}"#).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.greedy.top_candidates, 3);
        assert_eq!(
            config.genetic.population_size,
            RecommenderConfig::default().genetic.population_size
        );
    }
}
