use std::fmt;

use crate::models::{Food, NutritionTotals};

/// Canonical identity of a combination: its member keys, sorted.
///
/// Two combinations with the same members compare equal regardless of the
/// order they were discovered in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(Vec<String>);

impl Signature {
    pub fn from_foods(foods: &[&Food]) -> Self {
        let mut keys: Vec<String> = foods.iter().map(|f| f.key()).collect();
        keys.sort();
        Self(keys)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" + "))
    }
}

/// One recommended meal: a duplicate-free set of foods and its totals.
#[derive(Debug, Clone)]
pub struct Recommendation<'a> {
    pub foods: Vec<&'a Food>,

    /// Always recomputed from `foods`.
    pub totals: NutritionTotals,

    /// Set when the combination misses at least one floor and was kept as
    /// the closest approximation found.
    pub best_effort: bool,
}

impl<'a> Recommendation<'a> {
    pub fn new(foods: Vec<&'a Food>) -> Self {
        let totals = NutritionTotals::from_foods(foods.iter().copied());
        Self {
            foods,
            totals,
            best_effort: false,
        }
    }

    pub fn best_effort(foods: Vec<&'a Food>) -> Self {
        Self {
            best_effort: true,
            ..Self::new(foods)
        }
    }

    pub fn signature(&self) -> Signature {
        Signature::from_foods(&self.foods)
    }

    pub fn names(&self) -> Vec<&str> {
        self.foods.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_is_order_independent() {
        let a = Food::new("Kimchi", "Kimchi", 30.0, 2.0, 0.5, 4.0);
        let b = Food::new("Rice", "Rice", 300.0, 6.0, 1.0, 65.0);

        assert_eq!(Signature::from_foods(&[&a, &b]), Signature::from_foods(&[&b, &a]));
        assert_eq!(Signature::from_foods(&[&a, &b]).to_string(), "kimchi + rice");
    }

    #[test]
    fn test_totals_match_members() {
        let a = Food::new("Kimchi", "Kimchi", 30.0, 2.0, 0.5, 4.0);
        let b = Food::new("Rice", "Rice", 300.0, 6.0, 1.0, 65.0);
        let rec = Recommendation::new(vec![&a, &b]);

        assert_eq!(rec.totals, NutritionTotals::from_foods([&a, &b]));
        assert_eq!(rec.names(), vec!["Kimchi", "Rice"]);
        assert!(!rec.best_effort);
    }
}
