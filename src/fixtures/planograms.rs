//! Planogram Fixtures

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_norway::Value;

use crate::{
    fixtures::FixtureError,
    items::{Item, ItemType},
    planogram::Planogram,
};

const TABLE: &str = "planogram";

/// Columns every planogram row must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "module_id",
    "layer_id",
    "item_code",
    "item_type",
    "item_width",
    "position",
];

/// Wrapper for planogram rows in YAML
#[derive(Debug, Deserialize)]
pub struct PlanogramFixture {
    /// Rows in table order
    pub items: Vec<ItemFixture>,
}

/// One planogram row, before column validation
#[derive(Debug, Deserialize)]
pub struct ItemFixture {
    /// Module (bay) id
    pub module_id: Option<i64>,

    /// Layer (shelf) id
    pub layer_id: Option<i64>,

    /// Product code, string or number
    pub item_code: Option<Value>,

    /// Item type, `tray` for removable fixtures
    pub item_type: Option<String>,

    /// Linear width
    pub item_width: Option<f64>,

    /// Left edge offset on the layer
    pub position: Option<f64>,

    /// Any other columns
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl ItemFixture {
    fn has_column(&self, column: &str) -> bool {
        match column {
            "module_id" => self.module_id.is_some(),
            "layer_id" => self.layer_id.is_some(),
            "item_code" => self.item_code.is_some(),
            "item_type" => self.item_type.is_some(),
            "item_width" => self.item_width.is_some(),
            "position" => self.position.is_some(),
            _ => self.attributes.contains_key(column),
        }
    }

    fn into_item(self, row: usize) -> Result<Item, FixtureError> {
        let missing = |column: &'static str| FixtureError::SchemaMismatch {
            table: TABLE,
            missing: vec![column],
        };

        let item_width = self.item_width.ok_or_else(|| missing("item_width"))?;

        if !(item_width.is_finite() && item_width > 0.0) {
            return Err(invalid(row, "item_width", format!("must be positive, got {item_width}")));
        }

        let position = self.position.ok_or_else(|| missing("position"))?;

        if !position.is_finite() {
            return Err(invalid(row, "position", format!("must be finite, got {position}")));
        }

        let item_code = match self.item_code.ok_or_else(|| missing("item_code"))? {
            Value::String(code) => code,
            Value::Number(code) => code.to_string(),
            other => return Err(invalid(row, "item_code", format!("unsupported value {other:?}"))),
        };

        Ok(Item {
            module_id: self.module_id.ok_or_else(|| missing("module_id"))?,
            layer_id: self.layer_id.ok_or_else(|| missing("layer_id"))?,
            item_code,
            item_type: ItemType::from(self.item_type.ok_or_else(|| missing("item_type"))?),
            item_width,
            position,
            attributes: self.attributes,
        })
    }
}

fn invalid(row: usize, column: &'static str, reason: String) -> FixtureError {
    FixtureError::InvalidValue {
        table: TABLE,
        row,
        column,
        reason,
    }
}

/// Required columns absent from at least one row, in declaration order.
pub fn missing_columns(rows: &[ItemFixture]) -> Vec<&'static str> {
    REQUIRED_COLUMNS
        .into_iter()
        .filter(|column| rows.iter().any(|row| !row.has_column(column)))
        .collect()
}

impl TryFrom<PlanogramFixture> for Planogram {
    type Error = FixtureError;

    fn try_from(fixture: PlanogramFixture) -> Result<Self, Self::Error> {
        let missing = missing_columns(&fixture.items);

        if !missing.is_empty() {
            return Err(FixtureError::SchemaMismatch {
                table: TABLE,
                missing,
            });
        }

        fixture
            .items
            .into_iter()
            .enumerate()
            .map(|(row, item)| item.into_item(row))
            .collect()
    }
}
