//! Sales Fixtures

use serde::Deserialize;
use serde_norway::Value;
use tracing::warn;

use crate::{fixtures::FixtureError, sales::SalesTable};

const TABLE: &str = "sales";

/// Wrapper for sales rows in YAML
#[derive(Debug, Deserialize)]
pub struct SalesFixture {
    /// One row per item code
    pub sales: Vec<SalesRowFixture>,
}

/// One sales row, before column validation
#[derive(Debug, Deserialize)]
pub struct SalesRowFixture {
    /// Product code, string or number
    pub item_code: Option<Value>,

    /// Sales figure
    pub sales: Option<f64>,
}

impl TryFrom<SalesFixture> for SalesTable {
    type Error = FixtureError;

    fn try_from(fixture: SalesFixture) -> Result<Self, Self::Error> {
        let mut missing = Vec::new();

        if fixture.sales.iter().any(|row| row.item_code.is_none()) {
            missing.push("item_code");
        }

        if fixture.sales.iter().any(|row| row.sales.is_none()) {
            missing.push("sales");
        }

        if !missing.is_empty() {
            return Err(FixtureError::SchemaMismatch {
                table: TABLE,
                missing,
            });
        }

        let mut table = SalesTable::new();

        for (row, entry) in fixture.sales.into_iter().enumerate() {
            let (Some(code), Some(sales)) = (entry.item_code, entry.sales) else {
                continue;
            };

            let code = match code {
                Value::String(code) => code,
                Value::Number(code) => code.to_string(),
                other => {
                    return Err(invalid(row, "item_code", format!("unsupported value {other:?}")));
                }
            };

            if !(sales.is_finite() && sales >= 0.0) {
                return Err(invalid(row, "sales", format!("must be non-negative, got {sales}")));
            }

            if table.get(&code).is_some() {
                warn!(item_code = %code, row, "duplicate sales row, later value wins");
            }

            table.insert(code, sales);
        }

        Ok(table)
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
