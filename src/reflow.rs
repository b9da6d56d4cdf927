//! Layer reflow
//!
//! Per-layer pipeline run after trays are removed:
//!
//! 1. [`fill::virtual_fill`] decides how many copies each product gains,
//!    in sales order, within the freed width and the per-product unit cap.
//! 2. [`arrange::arrange`] inserts those copies directly after the first unit
//!    of the same product.
//! 3. [`position::reposition`] spreads every item evenly across the layer.
//!
//! Repositioning always runs, so a layer with no room for copies is still
//! normalised to even spacing.

use tracing::{debug, info, instrument};

use crate::{
    items::Item,
    layers::LayerKey,
    orchestrator::ReflowError,
    ranking::Candidate,
    space::LayerSpace,
};

pub mod arrange;
pub mod fill;
pub mod position;

pub use fill::FillPlan;

/// Default layer width.
pub const DEFAULT_LAYER_WIDTH: f64 = 1000.0;

/// Default cap on units per product on one layer.
pub const DEFAULT_MAX_UNITS: usize = 2;

/// Fixed parameters of a reflow run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ReflowSettings {
    /// Width every layer is laid out across
    pub layer_width: f64,

    /// Maximum units of one product on a layer, existing units included
    pub max_units: usize,
}

impl Default for ReflowSettings {
    fn default() -> Self {
        Self {
            layer_width: DEFAULT_LAYER_WIDTH,
            max_units: DEFAULT_MAX_UNITS,
        }
    }
}

/// Final state of a reflowed layer.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerReflow {
    /// Layer that was reflowed
    pub layer: LayerKey,

    /// Items in sequence order with their new positions
    pub items: Vec<Item>,

    /// Copies that were added
    pub plan: FillPlan,

    /// Gap between neighbouring items
    pub spacing: f64,
}

/// Why a layer was left in its post-removal state.
#[derive(Debug)]
pub enum SkipReason {
    /// No items remain on the layer
    EmptyLayer,

    /// No products to rank on the layer
    NoCandidates,

    /// Input required for the layer was absent
    MissingInput(ReflowError),
}

/// Result of reflowing one layer.
#[derive(Debug)]
pub enum LayerOutcome {
    /// Layer was filled and repositioned
    Reflowed(LayerReflow),

    /// Layer was left untouched
    Skipped {
        /// Layer that was skipped
        layer: LayerKey,

        /// Why it was skipped
        reason: SkipReason,
    },
}

impl LayerOutcome {
    /// Layer the outcome refers to.
    pub fn layer(&self) -> LayerKey {
        match self {
            LayerOutcome::Reflowed(reflow) => reflow.layer,
            LayerOutcome::Skipped { layer, .. } => *layer,
        }
    }

    /// The reflowed layer, if it was not skipped.
    pub fn reflowed(&self) -> Option<&LayerReflow> {
        match self {
            LayerOutcome::Reflowed(reflow) => Some(reflow),
            LayerOutcome::Skipped { .. } => None,
        }
    }
}

/// Fill and reposition one layer.
///
/// `original` must hold the layer's items in position order and `candidates`
/// its products in rank order. The free width comes from `space`, computed on
/// the post-removal items.
#[instrument(
    skip_all,
    fields(module_id = space.layer.module_id, layer_id = space.layer.layer_id)
)]
pub fn reflow_layer(
    space: &LayerSpace,
    candidates: &[Candidate],
    original: &[Item],
    settings: &ReflowSettings,
) -> LayerOutcome {
    let layer = space.layer;

    if original.is_empty() {
        info!("no items left on layer, skipping");

        return LayerOutcome::Skipped {
            layer,
            reason: SkipReason::EmptyLayer,
        };
    }

    if candidates.is_empty() {
        info!("no fill candidates on layer, skipping");

        return LayerOutcome::Skipped {
            layer,
            reason: SkipReason::NoCandidates,
        };
    }

    let plan = fill::virtual_fill(
        space.remaining_width,
        candidates,
        original,
        settings.max_units,
    );

    if plan.is_empty() {
        debug!(
            remaining_width = space.remaining_width,
            "not enough room for any copy"
        );
    }

    let mut items = arrange::arrange(original, &plan);
    let spacing = position::reposition(&mut items, settings.layer_width);

    debug!(
        item_count = items.len(),
        copies_added = plan.total_copies(),
        spacing,
        "layer repositioned"
    );

    LayerOutcome::Reflowed(LayerReflow {
        layer,
        items,
        plan,
        spacing,
    })
}
