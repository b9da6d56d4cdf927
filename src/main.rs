//! Shelf reflow command line entry point.
//!
//! Loads a planogram and sales fixture, removes trays, reflows every layer
//! that lost one, and optionally writes the result.

use std::{io, process::ExitCode};

use thiserror::Error;
use tracing::{error, info};

use shelf_reflow::{
    config::Config,
    fixtures::{Fixture, FixtureError, save_planogram},
    layers::AffectedLayers,
    observability,
    orchestrator::{ReflowError, reflow_all},
    space,
};

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Reflow(#[from] ReflowError),

    #[error("failed to write summary: {0}")]
    Output(#[from] io::Error),
}

fn main() -> ExitCode {
    let config = Config::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = observability::init(&config.log_level, config.log_format) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("{error}");
        }

        return ExitCode::FAILURE;
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "reflow failed");

            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), RunError> {
    let mut fixture = Fixture::with_base_path(&config.fixtures);

    fixture
        .load_planogram(&config.planogram)?
        .load_sales(config.sales_name())?;

    let (mut planogram, sales) = fixture.into_parts();
    let settings = config.settings();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if config.summary {
        space::analyze(planogram.items(), settings.layer_width).write_to(&mut out)?;
    }

    let mut affected = AffectedLayers::new();

    planogram.remove_trays(&mut affected);

    info!(affected_layers = affected.len(), "layers affected by tray removal");

    let report = reflow_all(&affected, &planogram, &sales, &settings)?;

    if config.summary {
        report.write_to(&mut out)?;
    }

    let planogram = report.into_planogram();

    if let Some(path) = &config.output {
        if let Err(error) = save_planogram(path, &planogram) {
            error!(path = %path.display(), %error, "failed to save planogram");
        }
    } else {
        planogram.write_to(&mut out)?;
    }

    Ok(())
}
