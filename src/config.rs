//! Command line and environment configuration

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::reflow::{DEFAULT_LAYER_WIDTH, DEFAULT_MAX_UNITS, ReflowSettings};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Shelf reflow configuration
#[derive(Debug, Parser)]
#[command(
    name = "shelf-reflow",
    about = "Fill shelf space freed by tray removal",
    long_about = None
)]
pub struct Config {
    /// Directory holding `planograms/` and `sales/` fixtures
    #[arg(short, long, env = "SHELF_FIXTURES", default_value = "./fixtures")]
    pub fixtures: PathBuf,

    /// Planogram fixture name
    #[arg(short, long, env = "SHELF_PLANOGRAM")]
    pub planogram: String,

    /// Sales fixture name, defaults to the planogram name
    #[arg(short, long, env = "SHELF_SALES")]
    pub sales: Option<String>,

    /// Output file for the reflowed planogram
    #[arg(short, long, env = "SHELF_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Width of every layer
    #[arg(long, env = "SHELF_LAYER_WIDTH", default_value_t = DEFAULT_LAYER_WIDTH)]
    pub layer_width: f64,

    /// Maximum units of one product on a layer
    #[arg(long, env = "SHELF_MAX_UNITS", default_value_t = DEFAULT_MAX_UNITS)]
    pub max_units: usize,

    /// Print space and outcome tables
    #[arg(long)]
    pub summary: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Name of the sales fixture to load
    pub fn sales_name(&self) -> &str {
        self.sales.as_deref().unwrap_or(&self.planogram)
    }

    /// Reflow settings derived from the configuration
    pub fn settings(&self) -> ReflowSettings {
        ReflowSettings {
            layer_width: self.layer_width,
            max_units: self.max_units,
        }
    }
}
