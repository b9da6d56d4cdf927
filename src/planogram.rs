//! Planogram

use std::{cmp::Ordering, io};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tabled::builder::Builder;
use tracing::info;

use crate::{
    items::Item,
    layers::{AffectedLayers, LayerKey},
    tables::{format_width, write_table},
};

/// The full table of items placed across a fixture.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Planogram {
    items: Vec<Item>,
}

impl Planogram {
    /// Create a planogram from items in table order.
    pub fn new(items: impl Into<Vec<Item>>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// All items, in table order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the planogram has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every tray, recording the layers they sat on.
    ///
    /// Layers are appended to `affected` in the order their first tray appears
    /// in the table. Returns the number of rows removed.
    pub fn remove_trays(&mut self, affected: &mut AffectedLayers) -> usize {
        let before_affected = affected.len();

        affected.extend(
            self.items
                .iter()
                .filter(|item| item.is_tray())
                .map(Item::layer_key),
        );

        let before = self.items.len();

        self.items.retain(|item| !item.is_tray());

        let removed = before - self.items.len();

        if removed == 0 {
            info!("no trays found, nothing removed");
        } else {
            info!(
                removed,
                new_layers = affected.len() - before_affected,
                affected_layers = affected.len(),
                "removed trays"
            );
        }

        removed
    }

    /// Items on `layer`, in table order.
    pub fn layer_items(&self, layer: LayerKey) -> Vec<Item> {
        self.items
            .iter()
            .filter(|item| item.layer_key() == layer)
            .cloned()
            .collect()
    }

    /// Items on `layer`, ordered by position.
    ///
    /// Items sharing a position keep their table order.
    pub fn layer_items_by_position(&self, layer: LayerKey) -> Vec<Item> {
        let mut items = self.layer_items(layer);

        sort_by_position(&mut items);

        items
    }

    /// Items grouped by layer in one pass, each group in table order.
    pub fn by_layer(&self) -> FxHashMap<LayerKey, Vec<Item>> {
        let mut layers: FxHashMap<LayerKey, Vec<Item>> = FxHashMap::default();

        for item in &self.items {
            layers.entry(item.layer_key()).or_default().push(item.clone());
        }

        layers
    }

    /// Stable sort by module, layer, then position.
    pub fn sort(&mut self) {
        self.items.sort_by(|a, b| {
            a.layer_key()
                .cmp(&b.layer_key())
                .then_with(|| compare_positions(a, b))
        });
    }

    /// Write every item as a console table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        let mut builder = Builder::default();

        builder.push_record(["Module", "Layer", "Item", "Type", "Width", "Position"]);

        for item in &self.items {
            builder.push_record([
                item.module_id.to_string(),
                item.layer_id.to_string(),
                item.item_code.clone(),
                String::from(item.item_type.clone()),
                format_width(item.item_width),
                format_width(item.position),
            ]);
        }

        write_table(&mut out, builder, 4..)
    }
}

/// Stable sort of one layer's items by position.
///
/// `-0.0` and `0.0` are the same position, so such items keep their order.
pub fn sort_by_position(items: &mut [Item]) {
    items.sort_by(compare_positions);
}

fn compare_positions(a: &Item, b: &Item) -> Ordering {
    a.position.partial_cmp(&b.position).unwrap_or(Ordering::Equal)
}

impl FromIterator<Item> for Planogram {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn codes(items: &[Item]) -> Vec<&str> {
        items.iter().map(|item| item.item_code.as_str()).collect()
    }

    #[test]
    fn remove_trays_drops_rows_and_records_layers() {
        let mut planogram = Planogram::new(vec![
            Item::new(LayerKey::new(1, 1), "A", 100.0, 0.0),
            Item::tray(LayerKey::new(2, 1), "T1", 50.0, 0.0),
            Item::tray(LayerKey::new(1, 1), "T2", 50.0, 100.0),
            Item::tray(LayerKey::new(2, 1), "T3", 50.0, 50.0),
            Item::new(LayerKey::new(2, 1), "B", 100.0, 100.0),
        ]);
        let mut affected = AffectedLayers::new();

        let removed = planogram.remove_trays(&mut affected);

        assert_eq!(removed, 3);
        assert_eq!(codes(planogram.items()), vec!["A", "B"]);
        assert_eq!(
            affected.iter().collect::<Vec<_>>(),
            vec![LayerKey::new(2, 1), LayerKey::new(1, 1)]
        );
    }

    #[test]
    fn remove_trays_without_trays_changes_nothing() {
        let items = vec![Item::new(LayerKey::new(1, 1), "A", 100.0, 0.0)];
        let mut planogram = Planogram::new(items.clone());
        let mut affected = AffectedLayers::new();

        assert_eq!(planogram.remove_trays(&mut affected), 0);
        assert_eq!(planogram.items(), items.as_slice());
        assert!(affected.is_empty(), "no affected layers");
    }

    #[test]
    fn repeated_removal_accumulates_affected_layers() {
        let mut affected = AffectedLayers::new();

        Planogram::new(vec![Item::tray(LayerKey::new(1, 1), "T", 10.0, 0.0)])
            .remove_trays(&mut affected);
        Planogram::new(vec![
            Item::tray(LayerKey::new(1, 1), "T", 10.0, 0.0),
            Item::tray(LayerKey::new(3, 2), "T", 10.0, 0.0),
        ])
        .remove_trays(&mut affected);

        assert_eq!(
            affected.iter().collect::<Vec<_>>(),
            vec![LayerKey::new(1, 1), LayerKey::new(3, 2)]
        );
    }

    #[test]
    fn layer_items_by_position_orders_one_layer() {
        let layer = LayerKey::new(1, 1);
        let planogram = Planogram::new(vec![
            Item::new(layer, "C", 100.0, 500.0),
            Item::new(LayerKey::new(1, 2), "X", 100.0, 0.0),
            Item::new(layer, "A", 100.0, 0.0),
            Item::new(layer, "B", 100.0, 250.0),
        ]);

        assert_eq!(codes(&planogram.layer_items(layer)), vec!["C", "A", "B"]);
        assert_eq!(
            codes(&planogram.layer_items_by_position(layer)),
            vec!["A", "B", "C"]
        );
    }

    #[test]
    fn negative_zero_position_keeps_table_order() {
        let layer = LayerKey::new(1, 1);
        let mut planogram = Planogram::new(vec![
            Item::new(layer, "A", 100.0, 0.0),
            Item::new(layer, "B", 100.0, -0.0),
        ]);

        assert_eq!(codes(&planogram.layer_items_by_position(layer)), vec!["A", "B"]);

        planogram.sort();

        assert_eq!(codes(planogram.items()), vec!["A", "B"]);
    }

    #[test]
    fn by_layer_groups_in_table_order() {
        let planogram = Planogram::new(vec![
            Item::new(LayerKey::new(1, 1), "C", 100.0, 500.0),
            Item::new(LayerKey::new(1, 2), "X", 100.0, 0.0),
            Item::new(LayerKey::new(1, 1), "A", 100.0, 0.0),
        ]);

        let layers = planogram.by_layer();

        assert_eq!(layers.len(), 2);
        assert_eq!(
            layers.get(&LayerKey::new(1, 1)).map(Vec::as_slice).map(codes),
            Some(vec!["C", "A"])
        );
        assert_eq!(
            layers.get(&LayerKey::new(1, 2)).map(Vec::as_slice).map(codes),
            Some(vec!["X"])
        );
    }

    #[test]
    fn sort_orders_by_module_layer_position() {
        let mut planogram = Planogram::new(vec![
            Item::new(LayerKey::new(2, 1), "D", 100.0, 0.0),
            Item::new(LayerKey::new(1, 2), "C", 100.0, 0.0),
            Item::new(LayerKey::new(1, 1), "B", 100.0, 300.0),
            Item::new(LayerKey::new(1, 1), "A", 100.0, 0.0),
        ]);

        planogram.sort();

        assert_eq!(codes(planogram.items()), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn write_to_lists_items() -> TestResult {
        let planogram = Planogram::new(vec![Item::new(LayerKey::new(1, 1), "SKU-1", 120.0, 0.0)]);
        let mut out = Vec::new();

        planogram.write_to(&mut out)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("SKU-1"), "item code rendered");
        assert!(rendered.contains("120.00"), "width rendered");

        Ok(())
    }
}
