//! Fixtures
//!
//! YAML-backed loading and saving of planogram and sales tables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{info, warn};

use crate::{planogram::Planogram, sales::SalesTable};

pub mod planograms;
pub mod sales;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading or writing fixture files
    #[error("Failed to access fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialisation error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Required columns are absent from the table
    #[error("{table} table is missing required columns: {}", .missing.join(", "))]
    SchemaMismatch {
        /// Table that failed validation
        table: &'static str,

        /// Names of the absent columns
        missing: Vec<&'static str>,
    },

    /// A cell holds a value the reflow cannot use
    #[error("Invalid {column} in {table} row {row}: {reason}")]
    InvalidValue {
        /// Table containing the value
        table: &'static str,

        /// Zero-based row index
        row: usize,

        /// Column name
        column: &'static str,

        /// What is wrong with the value
        reason: String,
    },
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Loaded planogram, empty until loaded
    planogram: Planogram,

    /// Loaded sales, empty until loaded
    sales: SalesTable,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            planogram: Planogram::default(),
            sales: SalesTable::default(),
        }
    }

    /// Load a planogram from `planograms/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a required
    /// column is missing, or if a value is unusable.
    pub fn load_planogram(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.fixture_path("planograms", name);
        let contents = fs::read_to_string(&file_path)?;
        let fixture: planograms::PlanogramFixture = serde_norway::from_str(&contents)?;

        self.planogram = fixture.try_into()?;

        info!(
            path = %file_path.display(),
            rows = self.planogram.len(),
            "loaded planogram"
        );

        Ok(self)
    }

    /// Load sales figures from `sales/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a required
    /// column is missing, or if a sales figure is negative.
    pub fn load_sales(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.fixture_path("sales", name);
        let contents = fs::read_to_string(&file_path)?;
        let fixture: sales::SalesFixture = serde_norway::from_str(&contents)?;

        self.sales = fixture.try_into()?;

        info!(
            path = %file_path.display(),
            items = self.sales.len(),
            "loaded sales"
        );

        Ok(self)
    }

    /// Load a planogram and sales fixture with the same name
    ///
    /// # Errors
    ///
    /// Returns an error if either fixture cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_planogram(name)?.load_sales(name)?;

        Ok(fixture)
    }

    /// The loaded planogram
    pub fn planogram(&self) -> &Planogram {
        &self.planogram
    }

    /// The loaded sales table
    pub fn sales(&self) -> &SalesTable {
        &self.sales
    }

    /// Consume the fixture, returning the planogram and sales table
    pub fn into_parts(self) -> (Planogram, SalesTable) {
        (self.planogram, self.sales)
    }

    fn fixture_path(&self, category: &str, name: &str) -> PathBuf {
        self.base_path.join(category).join(format!("{name}.yml"))
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `planogram` to `path` as YAML, sorted by module, layer and position.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if the table cannot be serialised or written.
pub fn save_planogram(path: &Path, planogram: &Planogram) -> Result<(), FixtureError> {
    if planogram.is_empty() {
        warn!(path = %path.display(), "planogram is empty, writing an empty table");
    }

    let mut sorted = planogram.clone();
    sorted.sort();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, serde_norway::to_string(&sorted)?)?;

    info!(path = %path.display(), rows = sorted.len(), "saved planogram");

    Ok(())
}
