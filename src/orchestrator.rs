//! Orchestrator
//!
//! Runs the layer reflow over every affected layer and merges the results
//! back into the planogram.

use std::io;

use rustc_hash::FxHashSet;
use tabled::builder::Builder;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::{
    layers::{AffectedLayers, LayerKey},
    planogram::{Planogram, sort_by_position},
    ranking::rank,
    reflow::{LayerOutcome, ReflowSettings, SkipReason, reflow_layer},
    sales::SalesTable,
    space::{self, SpaceSummary},
    tables::{format_width, write_table},
};

/// Errors raised while reflowing a planogram.
#[derive(Debug, Error)]
pub enum ReflowError {
    /// Data required for one layer was absent; only that layer is skipped.
    #[error("missing {what} for layer {layer}")]
    MissingInput {
        /// Layer the data was needed for
        layer: LayerKey,

        /// What was missing
        what: &'static str,
    },

    /// Reflow settings cannot produce a layout; the whole run is aborted.
    #[error("invalid reflow settings: {0}")]
    InvalidSettings(String),
}

/// Merged planogram plus what happened to each affected layer.
#[derive(Debug)]
pub struct ReflowReport {
    planogram: Planogram,
    outcomes: Vec<LayerOutcome>,
}

impl ReflowReport {
    /// The merged planogram, sorted by module, layer and position.
    pub fn planogram(&self) -> &Planogram {
        &self.planogram
    }

    /// Consume the report, returning the merged planogram.
    pub fn into_planogram(self) -> Planogram {
        self.planogram
    }

    /// Per-layer outcomes, in affected-set order.
    pub fn outcomes(&self) -> &[LayerOutcome] {
        &self.outcomes
    }

    /// Number of layers that were reflowed.
    pub fn reflowed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.reflowed().is_some())
            .count()
    }

    /// Write the per-layer outcomes as a console table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        let mut builder = Builder::default();

        builder.push_record(["Module", "Layer", "Outcome", "Items", "Copies", "Spacing"]);

        for outcome in &self.outcomes {
            let layer = outcome.layer();

            let (label, items, copies, spacing) = match outcome {
                LayerOutcome::Reflowed(reflow) => (
                    "reflowed".to_string(),
                    reflow.items.len().to_string(),
                    reflow.plan.total_copies().to_string(),
                    format_width(reflow.spacing),
                ),
                LayerOutcome::Skipped { reason, .. } => (
                    skip_label(reason),
                    String::new(),
                    String::new(),
                    String::new(),
                ),
            };

            builder.push_record([
                layer.module_id.to_string(),
                layer.layer_id.to_string(),
                label,
                items,
                copies,
                spacing,
            ]);
        }

        write_table(&mut out, builder, 3..)
    }
}

fn skip_label(reason: &SkipReason) -> String {
    match reason {
        SkipReason::EmptyLayer => "skipped: empty layer".to_string(),
        SkipReason::NoCandidates => "skipped: no candidates".to_string(),
        SkipReason::MissingInput(error) => format!("skipped: {error}"),
    }
}

/// Reflow every affected layer of a post-removal planogram.
///
/// Space is computed from `planogram` itself before any layer is touched.
///
/// # Errors
///
/// Returns [`ReflowError::InvalidSettings`] if the layer width is not a
/// positive finite number.
pub fn reflow_all(
    affected: &AffectedLayers,
    planogram: &Planogram,
    sales: &SalesTable,
    settings: &ReflowSettings,
) -> Result<ReflowReport, ReflowError> {
    let summary = space::analyze(planogram.items(), settings.layer_width);

    reflow_with_summary(affected, planogram, &summary, sales, settings)
}

/// Reflow every affected layer using a precomputed space summary.
///
/// A layer with items but no entry in `summary` is skipped with
/// [`ReflowError::MissingInput`]; other layers are unaffected by it.
///
/// # Errors
///
/// Returns [`ReflowError::InvalidSettings`] if the layer width is not a
/// positive finite number.
#[instrument(skip_all, fields(affected_layers = affected.len()))]
pub fn reflow_with_summary(
    affected: &AffectedLayers,
    planogram: &Planogram,
    summary: &SpaceSummary,
    sales: &SalesTable,
    settings: &ReflowSettings,
) -> Result<ReflowReport, ReflowError> {
    if !(settings.layer_width.is_finite() && settings.layer_width > 0.0) {
        return Err(ReflowError::InvalidSettings(format!(
            "layer width must be positive, got {}",
            settings.layer_width
        )));
    }

    let layers = planogram.by_layer();

    let outcomes: Vec<LayerOutcome> = summary
        .for_layers(affected)
        .map(|(layer, space)| {
            let table_order = layers.get(&layer).map(Vec::as_slice).unwrap_or_default();
            let mut original = table_order.to_vec();

            sort_by_position(&mut original);

            match space {
                Some(space) => {
                    let candidates = rank(table_order, sales);

                    reflow_layer(space, &candidates, &original, settings)
                }
                None if original.is_empty() => {
                    info!(%layer, "no items left on layer, skipping");

                    LayerOutcome::Skipped {
                        layer,
                        reason: SkipReason::EmptyLayer,
                    }
                }
                None => {
                    let error = ReflowError::MissingInput {
                        layer,
                        what: "layer space",
                    };

                    warn!(%layer, %error, "skipping layer");

                    LayerOutcome::Skipped {
                        layer,
                        reason: SkipReason::MissingInput(error),
                    }
                }
            }
        })
        .collect();

    let planogram = merge(planogram, &outcomes);

    info!(
        reflowed = outcomes.iter().filter(|o| o.reflowed().is_some()).count(),
        skipped = outcomes.iter().filter(|o| o.reflowed().is_none()).count(),
        items = planogram.len(),
        "reflow complete"
    );

    Ok(ReflowReport {
        planogram,
        outcomes,
    })
}

/// Replace reflowed layers and pass every other item through.
fn merge(planogram: &Planogram, outcomes: &[LayerOutcome]) -> Planogram {
    let reflowed: FxHashSet<LayerKey> = outcomes
        .iter()
        .filter_map(LayerOutcome::reflowed)
        .map(|reflow| reflow.layer)
        .collect();

    let untouched = planogram
        .items()
        .iter()
        .filter(|item| !reflowed.contains(&item.layer_key()))
        .cloned();

    let replaced = outcomes
        .iter()
        .filter_map(LayerOutcome::reflowed)
        .flat_map(|reflow| reflow.items.iter().cloned());

    let mut merged: Planogram = untouched.chain(replaced).collect();

    merged.sort();

    merged
}
