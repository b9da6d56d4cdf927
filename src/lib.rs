//! Shelf Reflow
//!
//! Reallocates planogram shelf space freed by removing fixture trays. Each
//! affected layer gains extra units of its best-selling products, placed next
//! to the originals, and is then re-spaced evenly across its fixed width.

pub mod config;
pub mod fixtures;
pub mod items;
pub mod layers;
pub mod observability;
pub mod orchestrator;
pub mod planogram;
pub mod prelude;
pub mod ranking;
pub mod reflow;
pub mod sales;
pub mod space;

mod tables;
