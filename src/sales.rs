//! Sales

use rustc_hash::FxHashMap;

/// Sales figures keyed by item code.
///
/// Lookups return `None` for unknown items; defaulting to zero happens where
/// the figure is consumed, see [`SalesTable::sales_or_zero`].
#[derive(Clone, Debug, Default)]
pub struct SalesTable {
    sales: FxHashMap<String, f64>,
}

impl SalesTable {
    /// Create an empty sales table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the sales figure for an item, replacing any previous value.
    pub fn insert(&mut self, item_code: impl Into<String>, sales: f64) {
        self.sales.insert(item_code.into(), sales);
    }

    /// Sales for an item, if present.
    pub fn get(&self, item_code: &str) -> Option<f64> {
        self.sales.get(item_code).copied()
    }

    /// Sales for an item, treating missing entries as zero.
    pub fn sales_or_zero(&self, item_code: &str) -> f64 {
        self.get(item_code).unwrap_or(0.0)
    }

    /// Number of items with a sales figure.
    pub fn len(&self) -> usize {
        self.sales.len()
    }

    /// Check if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for SalesTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            sales: iter
                .into_iter()
                .map(|(code, sales)| (code.into(), sales))
                .collect(),
        }
    }
}
