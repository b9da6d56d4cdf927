//! Items

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::layers::LayerKey;

/// Item type value that marks a removable fixture tray.
pub const TRAY: &str = "tray";

/// Discriminates fixture trays from regular stock.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum ItemType {
    /// Non-sellable fixture, removed before reflow
    Tray,

    /// Any other item type, kept verbatim
    Stock(String),
}

impl ItemType {
    /// Check if this is a tray.
    pub fn is_tray(&self) -> bool {
        matches!(self, ItemType::Tray)
    }
}

impl From<String> for ItemType {
    fn from(value: String) -> Self {
        if value == TRAY {
            ItemType::Tray
        } else {
            ItemType::Stock(value)
        }
    }
}

impl From<&str> for ItemType {
    fn from(value: &str) -> Self {
        ItemType::from(value.to_string())
    }
}

impl From<ItemType> for String {
    fn from(value: ItemType) -> Self {
        match value {
            ItemType::Tray => TRAY.to_string(),
            ItemType::Stock(name) => name,
        }
    }
}

/// One physical unit placed on a planogram layer.
///
/// The same `item_code` may appear several times on a layer; each occurrence
/// is a separate physical unit.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Item {
    /// Module (bay) the item sits in
    pub module_id: i64,

    /// Layer (shelf) within the module
    pub layer_id: i64,

    /// Product code
    pub item_code: String,

    /// Tray or stock
    pub item_type: ItemType,

    /// Linear width occupied on the layer
    pub item_width: f64,

    /// Offset of the item's left edge from the start of the layer
    pub position: f64,

    /// Columns not used by the reflow, carried through untouched
    #[serde(flatten)]
    pub attributes: BTreeMap<String, serde_norway::Value>,
}

impl Item {
    /// Create a stock item with no extra attributes.
    pub fn new(
        layer: LayerKey,
        item_code: impl Into<String>,
        item_width: f64,
        position: f64,
    ) -> Self {
        Self {
            module_id: layer.module_id,
            layer_id: layer.layer_id,
            item_code: item_code.into(),
            item_type: ItemType::Stock("product".to_string()),
            item_width,
            position,
            attributes: BTreeMap::new(),
        }
    }

    /// Create a tray on the given layer.
    pub fn tray(
        layer: LayerKey,
        item_code: impl Into<String>,
        item_width: f64,
        position: f64,
    ) -> Self {
        Self {
            item_type: ItemType::Tray,
            ..Self::new(layer, item_code, item_width, position)
        }
    }

    /// Returns the key of the layer this item sits on.
    pub fn layer_key(&self) -> LayerKey {
        LayerKey::new(self.module_id, self.layer_id)
    }

    /// Check if the item is a tray.
    pub fn is_tray(&self) -> bool {
        self.item_type.is_tray()
    }
}

/// Sum of `item_width` over the items.
pub fn total_width<'a>(items: impl IntoIterator<Item = &'a Item>) -> f64 {
    items.into_iter().map(|item| item.item_width).sum()
}
