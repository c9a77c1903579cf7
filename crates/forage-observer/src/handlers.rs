//! Endpoint handlers for the polling API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Advance one tick, return the frame |
//! | `GET` | `/api/state` | Current snapshot |
//! | `GET` | `/api/status` | Step, completion, and counters |
//! | `GET` | `/api/grid` | Food matrix and agent overlay |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{debug, info};

use forage_core::TickOutcome;
use forage_types::{AgentId, Position, SimulationEndReason, TickSnapshot};

use crate::error::ObserverError;
use crate::state::AppState;

/// Body returned by `GET /` once the run is over.
pub const FINISHED_MESSAGE: &str = "No more steps available or simulation completed";

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

/// One agent in a poll frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameAgent {
    /// Agent identifier.
    pub id: AgentId,
    /// Current cell as `[x, y]`.
    pub position: Position,
    /// Whether the agent holds a food unit.
    pub is_carrying: bool,
}

/// One food cell in a poll frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameFood {
    /// The cell as `[x, y]`.
    pub position: Position,
}

/// The body returned by `GET /` after a tick.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    /// Agents in id order.
    pub agents: Vec<FrameAgent>,
    /// Cells holding food.
    pub food: Vec<FrameFood>,
    /// The deposit cell as `[x, y]`.
    pub deposit_cell: Position,
}

impl From<&TickSnapshot> for Frame {
    fn from(snapshot: &TickSnapshot) -> Self {
        Self {
            agents: snapshot
                .agents
                .iter()
                .map(|a| FrameAgent {
                    id: a.id,
                    position: a.position,
                    is_carrying: a.is_carrying,
                })
                .collect(),
            food: snapshot
                .food
                .iter()
                .map(|&position| FrameFood { position })
                .collect(),
            deposit_cell: snapshot.deposit_cell,
        }
    }
}

/// The body returned by `GET /` once the run is over.
#[derive(Debug, Clone, Serialize)]
pub struct FinishedBody {
    /// Fixed human-readable message.
    pub message: &'static str,
    /// Why the run ended.
    pub reason: SimulationEndReason,
}

/// The body returned by `GET /api/status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusBody {
    /// Ticks executed so far.
    pub step: u64,
    /// The step budget.
    pub max_steps: u64,
    /// Whether all food has been delivered.
    pub completed: bool,
    /// Whether a tick failed.
    pub aborted: bool,
    /// Why the run will not advance, if it will not.
    pub end_reason: Option<SimulationEndReason>,
    /// Food units generated so far.
    pub food_generated: u32,
    /// Food units delivered so far.
    pub food_deposited: u32,
    /// Total food units the run will generate.
    pub food_budget: u32,
    /// Whether the deposit has been found.
    pub deposit_known: bool,
    /// Number of known food cells.
    pub known_food_cells: usize,
}

// ---------------------------------------------------------------------------
// GET / -- advance one tick
// ---------------------------------------------------------------------------

/// Advance the simulation by one tick and return the new frame.
///
/// Once the run is over the simulation is left untouched and the body is
/// a `message` object instead of a frame.
///
/// # Errors
///
/// Returns [`ObserverError::Simulation`] (500) if the tick fails or the
/// run was aborted earlier.
pub async fn advance(State(state): State<Arc<AppState>>) -> Result<Response, ObserverError> {
    let mut sim = state.simulation.lock().await;
    match sim.advance_one_tick()? {
        TickOutcome::Advanced(snapshot) => {
            debug!(step = snapshot.step, "Tick served");
            if snapshot.completed {
                info!(step = snapshot.step, "Run completed");
            }
            Ok(Json(Frame::from(&snapshot)).into_response())
        }
        TickOutcome::Finished(reason) => Ok(Json(FinishedBody {
            message: FINISHED_MESSAGE,
            reason,
        })
        .into_response()),
    }
}

// ---------------------------------------------------------------------------
// GET /api/state -- current snapshot
// ---------------------------------------------------------------------------

/// Return the current snapshot without advancing.
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<TickSnapshot> {
    let sim = state.simulation.lock().await;
    Json(sim.snapshot())
}

// ---------------------------------------------------------------------------
// GET /api/status -- counters
// ---------------------------------------------------------------------------

/// Return step, completion, and food counters.
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusBody> {
    let sim = state.simulation.lock().await;
    Json(StatusBody {
        step: sim.current_step(),
        max_steps: sim.max_steps(),
        completed: sim.is_complete(),
        aborted: sim.is_aborted(),
        end_reason: sim.end_reason(),
        food_generated: sim.food_generated(),
        food_deposited: sim.food_deposited(),
        food_budget: sim.food_budget(),
        deposit_known: sim.state().ledger.deposit_known(),
        known_food_cells: sim.state().ledger.known_food_cells().len(),
    })
}

// ---------------------------------------------------------------------------
// GET /api/grid -- numeric dump
// ---------------------------------------------------------------------------

/// Return the food matrix and the agent overlay, indexed `[x][y]`.
///
/// # Errors
///
/// Returns [`ObserverError::Serialization`] if the dump cannot be encoded.
pub async fn get_grid(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let sim = state.simulation.lock().await;
    Ok(Json(serde_json::to_value(sim.grid_dump())?))
}
