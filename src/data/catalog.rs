use std::collections::{BTreeMap, HashMap};
use std::ops::Index;

use tracing::warn;

use crate::models::Food;

/// Stable handle to a food in a [`Catalog`].
///
/// Compact enough for index-encoded search states, and resolves back to the
/// food (and thus its name-level identity) in O(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FoodId(usize);

impl FoodId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Ordered, read-only list of foods the strategies search over.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    foods: Vec<Food>,
    /// Lowercase name -> position.
    by_key: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, keeping the first occurrence of each name
    /// (case-insensitive).
    pub fn new(foods: Vec<Food>) -> Self {
        let mut catalog = Self::default();
        for food in foods {
            let key = food.key();
            if catalog.by_key.contains_key(&key) {
                warn!(name = %food.name, "duplicate food name, keeping first occurrence");
                continue;
            }
            catalog.by_key.insert(key, catalog.foods.len());
            catalog.foods.push(food);
        }
        catalog
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    #[inline]
    pub fn get(&self, id: FoodId) -> &Food {
        &self.foods[id.0]
    }

    /// Handle for the food at `index`, if in range.
    pub fn id_at(&self, index: usize) -> Option<FoodId> {
        (index < self.foods.len()).then_some(FoodId(index))
    }

    /// Look up a food by name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<FoodId> {
        self.by_key.get(&name.to_lowercase()).map(|&i| FoodId(i))
    }

    pub fn ids(&self) -> impl Iterator<Item = FoodId> + '_ {
        (0..self.foods.len()).map(FoodId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FoodId, &Food)> {
        self.foods.iter().enumerate().map(|(i, f)| (FoodId(i), f))
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    /// Handles of every food in the given category, in catalog order.
    pub fn ids_in_category(&self, label: &str) -> Vec<FoodId> {
        self.iter()
            .filter(|(_, f)| f.in_category(label))
            .map(|(id, _)| id)
            .collect()
    }

    /// Whether any food belongs to the given category (case-insensitive).
    pub fn has_category(&self, label: &str) -> bool {
        self.foods.iter().any(|f| f.in_category(label))
    }

    /// Category labels with their food counts, sorted by label.
    ///
    /// Labels differing only in case are counted together under the first
    /// spelling seen, matching how [`Food::in_category`] compares them.
    pub fn categories(&self) -> BTreeMap<String, usize> {
        let mut labels: HashMap<String, String> = HashMap::new();
        let mut counts = BTreeMap::new();
        for food in &self.foods {
            let label = labels
                .entry(food.category.to_lowercase())
                .or_insert_with(|| food.category.clone());
            *counts.entry(label.clone()).or_insert(0) += 1;
        }
        counts
    }
}

impl Index<FoodId> for Catalog {
    type Output = Food;

    fn index(&self, id: FoodId) -> &Food {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_foods() -> Vec<Food> {
        vec![
            Food::new("Rice", "Rice", 300.0, 6.0, 1.0, 65.0),
            Food::new("Bulgogi", "Grilled", 400.0, 30.0, 18.0, 20.0),
            Food::new("rice", "Rice", 999.0, 0.0, 0.0, 0.0),
            Food::new("Galbi", "grilled", 500.0, 35.0, 30.0, 10.0),
        ]
    }

    #[test]
    fn test_dedup_keeps_first() {
        let catalog = Catalog::new(sample_foods());
        assert_eq!(catalog.len(), 3);

        let rice = catalog.find("RICE").unwrap();
        assert_eq!(catalog[rice].energy, 300.0);
    }

    #[test]
    fn test_ids_in_category() {
        let catalog = Catalog::new(sample_foods());
        let grilled = catalog.ids_in_category("Grilled");
        assert_eq!(grilled.len(), 2);
        assert_eq!(catalog[grilled[0]].name, "Bulgogi");
    }

    #[test]
    fn test_id_at_bounds() {
        let catalog = Catalog::new(sample_foods());
        assert!(catalog.id_at(2).is_some());
        assert!(catalog.id_at(3).is_none());
    }

    #[test]
    fn test_categories_group_case_insensitively() {
        let catalog = Catalog::new(sample_foods());
        let categories = catalog.categories();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories.get("Rice"), Some(&1));
        assert_eq!(categories.get("Grilled"), Some(&2));
        assert_eq!(categories.get("grilled"), None);
        assert_eq!(categories["Grilled"], catalog.ids_in_category("grilled").len());
    }

    #[test]
    fn test_has_category() {
        let catalog = Catalog::new(sample_foods());
        assert!(catalog.has_category("GRILLED"));
        assert!(catalog.has_category("rice"));
        assert!(!catalog.has_category("구이"));
        assert!(!Catalog::default().has_category("Rice"));
    }
}
