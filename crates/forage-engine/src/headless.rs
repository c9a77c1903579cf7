//! Headless mode: run to the end without a server.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::info;

use forage_core::runner::{self, HistoryRecorder, RunReport};
use forage_core::{Simulation, SimulationConfig};

use crate::error::EngineError;

/// Run the simulation to completion or budget exhaustion.
///
/// When `simulation.history_path` is set, every tick's snapshot and grid
/// dump is written there as a JSON document.
///
/// # Errors
///
/// Returns [`EngineError`] if the simulation fails or the history cannot
/// be written.
pub fn run(config: &SimulationConfig) -> Result<RunReport, EngineError> {
    let mut sim = Simulation::new(config)?;
    let history_path = config.simulation.history_path.as_deref();

    let mut recorder = if history_path.is_some() {
        HistoryRecorder::with_grids()
    } else {
        HistoryRecorder::new()
    };
    let report = runner::run_to_end(&mut sim, &mut recorder)?;
    runner::log_run_end(&report);

    if let Some(path) = history_path {
        write_history(path, &report, &recorder)?;
        info!(path = %path.display(), ticks = recorder.len(), "History written");
    }
    Ok(report)
}

fn write_history(
    path: &Path,
    report: &RunReport,
    recorder: &HistoryRecorder,
) -> Result<(), EngineError> {
    let file = File::create(path).map_err(|source| EngineError::History {
        path: path.to_path_buf(),
        source,
    })?;
    let body = serde_json::json!({
        "report": report,
        "history": recorder.entries(),
    });
    serde_json::to_writer_pretty(BufWriter::new(file), &body)?;
    Ok(())
}
