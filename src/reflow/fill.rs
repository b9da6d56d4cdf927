//! Virtual fill
//!
//! Greedy, capacity-capped simulation of which products gain extra units.
//! Candidates are visited once, in rank order; each takes as many units as
//! fit before the next is considered. Space skipped by a wide candidate is
//! never reclaimed by revisiting it.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::{items::Item, ranking::Candidate};

/// Copies to add per product, in the order they were decided.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FillPlan {
    copies: SmallVec<[(String, usize); 8]>,
    remaining_width: f64,
}

impl FillPlan {
    /// Number of copies planned for `item_code`.
    pub fn copies_for(&self, item_code: &str) -> usize {
        self.copies
            .iter()
            .find(|(code, _)| code == item_code)
            .map_or(0, |(_, count)| *count)
    }

    /// Planned copies as `(item_code, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.copies.iter().map(|(code, count)| (code.as_str(), *count))
    }

    /// Total number of copies planned across all products.
    pub fn total_copies(&self) -> usize {
        self.copies.iter().map(|(_, count)| count).sum()
    }

    /// Check whether no copies were planned.
    pub fn is_empty(&self) -> bool {
        self.copies.is_empty()
    }

    /// Width left over after all planned copies.
    pub fn remaining_width(&self) -> f64 {
        self.remaining_width
    }
}

/// Plan copies for `candidates` within `remaining_width`.
///
/// Each product's total units (existing units in `original` plus copies) is
/// capped at `max_units`. When `remaining_width` is zero or negative no copy
/// is planned.
pub fn virtual_fill(
    remaining_width: f64,
    candidates: &[Candidate],
    original: &[Item],
    max_units: usize,
) -> FillPlan {
    let mut plan = FillPlan {
        copies: SmallVec::new(),
        remaining_width,
    };

    if remaining_width <= 0.0 {
        return plan;
    }

    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();

    for item in original {
        *counts.entry(item.item_code.as_str()).or_default() += 1;
    }

    for candidate in candidates {
        let count = counts.entry(candidate.item_code.as_str()).or_default();
        let mut added = 0;

        while *count < max_units && plan.remaining_width >= candidate.item_width {
            plan.remaining_width -= candidate.item_width;
            *count += 1;
            added += 1;

            debug!(
                item_code = %candidate.item_code,
                item_width = candidate.item_width,
                units = *count,
                remaining_width = plan.remaining_width,
                "planned copy"
            );
        }

        if added > 0 {
            plan.copies.push((candidate.item_code.clone(), added));
        }
    }

    plan
}
