//! Adjacency-preserving reconstruction

use rustc_hash::FxHashSet;

use crate::{items::Item, reflow::fill::FillPlan};

/// Build the layer sequence with planned copies inserted.
///
/// `original` must be in position order. All copies of a product follow the
/// first unit of that product; later units of the same product get none.
/// Copies keep the original's position until the layer is repositioned.
pub fn arrange(original: &[Item], plan: &FillPlan) -> Vec<Item> {
    let mut arranged = Vec::with_capacity(original.len() + plan.total_copies());
    let mut placed: FxHashSet<&str> = FxHashSet::default();

    for item in original {
        arranged.push(item.clone());

        let copies = plan.copies_for(&item.item_code);

        if copies > 0 && placed.insert(item.item_code.as_str()) {
            arranged.extend(std::iter::repeat_n(item, copies).cloned());
        }
    }

    arranged
}
