//! Headless simulation loop.
//!
//! [`run_to_end`] drives a [`Simulation`] until it reports that it is
//! finished, handing every new snapshot to a [`TickCallback`]. The
//! [`HistoryRecorder`] callback keeps the whole run in memory, optionally
//! with a grid dump per tick.

use serde::Serialize;
use tracing::{info, warn};

use forage_types::{GridDump, SimulationEndReason, TickSnapshot};

use crate::error::SimulationError;
use crate::simulation::{Simulation, TickOutcome};

/// Result of a complete run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Why the run ended.
    pub end_reason: SimulationEndReason,
    /// Ticks executed over the whole run.
    pub steps: u64,
    /// Food units generated.
    pub food_generated: u32,
    /// Food units delivered.
    pub food_deposited: u32,
    /// The final snapshot.
    pub final_snapshot: TickSnapshot,
}

/// Callback invoked after each tick completes.
pub trait TickCallback {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, snapshot: &TickSnapshot, sim: &Simulation);
}

/// A no-op tick callback.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _snapshot: &TickSnapshot, _sim: &Simulation) {}
}

/// One recorded tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// The state after the tick.
    pub snapshot: TickSnapshot,
    /// Grid dump after the tick, if grid recording is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridDump>,
}

/// Records every tick of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HistoryRecorder {
    entries: Vec<HistoryEntry>,
    #[serde(skip)]
    record_grids: bool,
}

impl HistoryRecorder {
    /// Create a recorder that keeps snapshots only.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            record_grids: false,
        }
    }

    /// Create a recorder that also keeps a grid dump per tick.
    pub const fn with_grids() -> Self {
        Self {
            entries: Vec::new(),
            record_grids: true,
        }
    }

    /// Recorded ticks, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Recorded snapshots, oldest first.
    pub fn snapshots(&self) -> impl Iterator<Item = &TickSnapshot> {
        self.entries.iter().map(|e| &e.snapshot)
    }

    /// Number of recorded ticks.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TickCallback for HistoryRecorder {
    fn on_tick(&mut self, snapshot: &TickSnapshot, sim: &Simulation) {
        self.entries.push(HistoryEntry {
            snapshot: snapshot.clone(),
            grid: self.record_grids.then(|| sim.grid_dump()),
        });
    }
}

/// Run the simulation until it finishes.
///
/// # Errors
///
/// Returns [`SimulationError`] if a tick fails or the simulation was
/// already aborted.
pub fn run_to_end(
    sim: &mut Simulation,
    callback: &mut dyn TickCallback,
) -> Result<RunReport, SimulationError> {
    info!(
        step = sim.current_step(),
        max_steps = sim.max_steps(),
        budget = sim.food_budget(),
        "Simulation starting"
    );

    loop {
        match sim.advance_one_tick()? {
            TickOutcome::Advanced(snapshot) => callback.on_tick(&snapshot, sim),
            TickOutcome::Finished(end_reason) => {
                return Ok(RunReport {
                    end_reason,
                    steps: sim.current_step(),
                    food_generated: sim.food_generated(),
                    food_deposited: sim.food_deposited(),
                    final_snapshot: sim.snapshot(),
                });
            }
        }
    }
}

/// Log the end of a run.
pub fn log_run_end(report: &RunReport) {
    info!(
        reason = %report.end_reason,
        steps = report.steps,
        generated = report.food_generated,
        deposited = report.food_deposited,
        "Simulation ended"
    );
    if report.end_reason == SimulationEndReason::StepBudgetExhausted {
        warn!(
            outstanding = report.food_generated.saturating_sub(report.food_deposited),
            carried = report.final_snapshot.carried_count(),
            "Step budget exhausted before all food was delivered"
        );
    }
}
