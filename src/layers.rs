//! Layers

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Identifies one fixed-width shelf segment on a planogram.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct LayerKey {
    /// Module (bay) the layer belongs to
    pub module_id: i64,

    /// Layer (shelf) within the module
    pub layer_id: i64,
}

impl LayerKey {
    /// Create a new layer key.
    pub fn new(module_id: i64, layer_id: i64) -> Self {
        Self {
            module_id,
            layer_id,
        }
    }
}

impl fmt::Display for LayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.module_id, self.layer_id)
    }
}

impl From<(i64, i64)> for LayerKey {
    fn from((module_id, layer_id): (i64, i64)) -> Self {
        Self::new(module_id, layer_id)
    }
}

/// Layers that lost at least one tray.
///
/// Append-only and deduplicated. Iteration follows first insertion, which is
/// the order the orchestrator reflows layers in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AffectedLayers {
    keys: SmallVec<[LayerKey; 16]>,
}

impl AffectedLayers {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key, returning `false` when it was already present.
    pub fn insert(&mut self, key: LayerKey) -> bool {
        if self.contains(key) {
            return false;
        }

        self.keys.push(key);

        true
    }

    /// Check whether the key is in the set.
    pub fn contains(&self, key: LayerKey) -> bool {
        self.keys.contains(&key)
    }

    /// Iterate keys in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = LayerKey> + '_ {
        self.keys.iter().copied()
    }

    /// Number of affected layers.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if no layer is affected.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<LayerKey> for AffectedLayers {
    fn from_iter<I: IntoIterator<Item = LayerKey>>(iter: I) -> Self {
        let mut layers = Self::new();

        layers.extend(iter);

        layers
    }
}

impl Extend<LayerKey> for AffectedLayers {
    fn extend<I: IntoIterator<Item = LayerKey>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_deduplicates_and_keeps_first_seen_order() {
        let mut layers = AffectedLayers::new();

        assert!(layers.insert(LayerKey::new(2, 1)), "first insert is new");
        assert!(layers.insert(LayerKey::new(1, 3)), "second key is new");
        assert!(!layers.insert(LayerKey::new(2, 1)), "repeat is rejected");

        let keys: Vec<_> = layers.iter().collect();

        assert_eq!(keys, vec![LayerKey::new(2, 1), LayerKey::new(1, 3)]);
        assert_eq!(layers.len(), 2);
    }

    #[test]
    fn extend_accumulates_across_calls() {
        let mut layers: AffectedLayers = [(1, 1), (1, 2)].into_iter().map(LayerKey::from).collect();

        layers.extend([LayerKey::new(1, 2), LayerKey::new(3, 1)]);

        let keys: Vec<_> = layers.iter().collect();

        assert_eq!(
            keys,
            vec![LayerKey::new(1, 1), LayerKey::new(1, 2), LayerKey::new(3, 1)]
        );
    }

    #[test]
    fn layer_keys_order_by_module_then_layer() {
        let mut keys = vec![LayerKey::new(2, 1), LayerKey::new(1, 2), LayerKey::new(1, 1)];

        keys.sort();

        assert_eq!(
            keys,
            vec![LayerKey::new(1, 1), LayerKey::new(1, 2), LayerKey::new(2, 1)]
        );
    }

    #[test]
    fn display_formats_as_tuple() {
        assert_eq!(LayerKey::new(4, 7).to_string(), "(4, 7)");
    }
}
