//! Shelf reflow prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    fixtures::{Fixture, FixtureError, save_planogram},
    items::{Item, ItemType},
    layers::{AffectedLayers, LayerKey},
    orchestrator::{ReflowError, ReflowReport, reflow_all, reflow_with_summary},
    planogram::Planogram,
    ranking::{Candidate, rank},
    reflow::{FillPlan, LayerOutcome, LayerReflow, ReflowSettings, SkipReason, reflow_layer},
    sales::SalesTable,
    space::{LayerSpace, SpaceSummary},
};
