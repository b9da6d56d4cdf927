//! Space accounting
//!
//! Used and remaining linear width per layer. This is the input contract for
//! the reflow: remaining width is what the fill step may spend.

use std::{collections::BTreeMap, io};

use tabled::builder::Builder;

use crate::{
    items::Item,
    layers::{AffectedLayers, LayerKey},
    tables::{format_width, write_table},
};

/// Width accounting for one layer.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerSpace {
    /// Layer the figures describe
    pub layer: LayerKey,

    /// Number of physical units on the layer
    pub item_count: usize,

    /// Sum of item widths
    pub used_width: f64,

    /// Fixed width of the layer
    pub total_width: f64,

    /// `total_width - used_width`; negative for an over-packed layer
    pub remaining_width: f64,
}

/// Compute the space used by `items` on a layer of width `total_width`.
///
/// An empty slice leaves the full width remaining.
pub fn compute(layer: LayerKey, items: &[Item], total_width: f64) -> LayerSpace {
    let used_width = crate::items::total_width(items);

    LayerSpace {
        layer,
        item_count: items.len(),
        used_width,
        total_width,
        remaining_width: total_width - used_width,
    }
}

/// Space accounting for every layer of a table, ordered by layer key.
#[derive(Clone, Debug, Default)]
pub struct SpaceSummary {
    layers: BTreeMap<LayerKey, LayerSpace>,
}

impl SpaceSummary {
    /// Space for a single layer, if it has any items.
    pub fn get(&self, layer: LayerKey) -> Option<&LayerSpace> {
        self.layers.get(&layer)
    }

    /// Iterate layers in key order.
    pub fn iter(&self) -> impl Iterator<Item = &LayerSpace> {
        self.layers.values()
    }

    /// Reindex the summary onto the affected layers, in their order.
    ///
    /// Layers left with no items after tray removal have no summary entry and
    /// map to `None`.
    pub fn for_layers<'a>(
        &'a self,
        affected: &'a AffectedLayers,
    ) -> impl Iterator<Item = (LayerKey, Option<&'a LayerSpace>)> + 'a {
        affected.iter().map(|layer| (layer, self.get(layer)))
    }

    /// Number of layers in the summary.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Check if the summary is empty.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Write the summary as a console table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        let mut builder = Builder::default();

        builder.push_record([
            "Module",
            "Layer",
            "Items",
            "Used Width",
            "Total Width",
            "Remaining",
        ]);

        for space in self.iter() {
            builder.push_record([
                space.layer.module_id.to_string(),
                space.layer.layer_id.to_string(),
                space.item_count.to_string(),
                format_width(space.used_width),
                format_width(space.total_width),
                format_width(space.remaining_width),
            ]);
        }

        write_table(&mut out, builder, 2..)
    }
}

/// Group `items` by layer and compute the space of each.
pub fn analyze(items: &[Item], total_width: f64) -> SpaceSummary {
    let mut grouped: BTreeMap<LayerKey, (usize, f64)> = BTreeMap::new();

    for item in items {
        let entry = grouped.entry(item.layer_key()).or_default();

        entry.0 += 1;
        entry.1 += item.item_width;
    }

    let layers = grouped
        .into_iter()
        .map(|(layer, (item_count, used_width))| {
            let space = LayerSpace {
                layer,
                item_count,
                used_width,
                total_width,
                remaining_width: total_width - used_width,
            };

            (layer, space)
        })
        .collect();

    SpaceSummary { layers }
}
