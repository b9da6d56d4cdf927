//! Repositioning

use crate::items::{Item, total_width};

/// Gap between neighbouring items that spreads `layer_width` evenly.
///
/// Zero for fewer than two items. Negative when the items are wider than the
/// layer; that is reported as-is rather than corrected.
pub fn spacing(items: &[Item], layer_width: f64) -> f64 {
    match items.len() {
        0 | 1 => 0.0,
        n => {
            #[expect(
                clippy::cast_precision_loss,
                reason = "item counts on one layer are far below 2^52"
            )]
            let gaps = (n - 1) as f64;

            (layer_width - total_width(items)) / gaps
        }
    }
}

/// Assign evenly spaced positions to `items` in sequence order.
///
/// The first item starts at zero and each following item starts one width
/// plus one gap after its predecessor. Returns the gap used.
pub fn reposition(items: &mut [Item], layer_width: f64) -> f64 {
    let gap = spacing(items, layer_width);
    let mut cursor = 0.0;

    for item in items {
        item.position = cursor;
        cursor += item.item_width + gap;
    }

    gap
}
