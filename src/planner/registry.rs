use std::collections::HashSet;

use crate::models::Signature;

/// Signatures already emitted for one request.
///
/// Create one per top-level request; never share across requests.
#[derive(Debug, Default)]
pub struct CombinationRegistry {
    seen: HashSet<Signature>,
}

impl CombinationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_new(&self, signature: &Signature) -> bool {
        !self.seen.contains(signature)
    }

    pub fn record(&mut self, signature: Signature) {
        self.seen.insert(signature);
    }

    /// Record `signature`, returning whether it was new.
    pub fn insert(&mut self, signature: Signature) -> bool {
        self.seen.insert(signature)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Food;

    #[test]
    fn test_registry_rejects_reordered_duplicate() {
        let a = Food::new("A", "Rice", 300.0, 20.0, 10.0, 30.0);
        let b = Food::new("B", "Bread", 250.0, 15.0, 8.0, 40.0);

        let mut registry = CombinationRegistry::new();
        let first = Signature::from_foods(&[&a, &b]);
        assert!(registry.is_new(&first));
        registry.record(first);

        let reordered = Signature::from_foods(&[&b, &a]);
        assert!(!registry.is_new(&reordered));
        assert!(!registry.insert(reordered));
        assert_eq!(registry.len(), 1);
    }
}
