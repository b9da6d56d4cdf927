//! Candidate ranking
//!
//! Decides the order in which a layer's products are offered free space.

use std::cmp::Ordering;

use rustc_hash::FxHashSet;

use crate::{items::Item, sales::SalesTable};

/// A distinct product on a layer, eligible for duplication.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    /// Product code
    pub item_code: String,

    /// Width of one unit, taken from the first occurrence on the layer
    pub item_width: f64,

    /// Sales figure, zero when the product has no sales entry
    pub sales: f64,
}

/// Rank the distinct products in `items` by descending sales.
///
/// One candidate is produced per `item_code`, using its first occurrence. The
/// sort is stable: products with equal sales keep their order in `items`,
/// and `-0.0` compares equal to `0.0`.
pub fn rank(items: &[Item], sales: &SalesTable) -> Vec<Candidate> {
    let mut seen = FxHashSet::default();

    let mut candidates: Vec<Candidate> = items
        .iter()
        .filter(|item| seen.insert(item.item_code.as_str()))
        .map(|item| Candidate {
            item_code: item.item_code.clone(),
            item_width: item.item_width,
            sales: sales.sales_or_zero(&item.item_code),
        })
        .collect();

    candidates.sort_by(|a, b| b.sales.partial_cmp(&a.sales).unwrap_or(Ordering::Equal));

    candidates
}
