//! Read-only views of the simulation produced after each tick.
//!
//! Snapshots are what external consumers (the polling API, the headless
//! recorder, tests) see. They are owned copies, detached from the live
//! simulation state.

use serde::{Deserialize, Serialize};

use crate::enums::Behavior;
use crate::geometry::Position;
use crate::ids::AgentId;

/// One agent as seen from outside the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentView {
    /// Agent identifier.
    pub id: AgentId,
    /// Current cell.
    pub position: Position,
    /// Whether the agent holds a food unit.
    pub is_carrying: bool,
    /// Behaviour chosen during the last decision.
    pub behavior: Behavior,
}

/// State of the simulation at the end of a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSnapshot {
    /// Number of ticks completed so far.
    pub step: u64,
    /// Agents in ascending identifier order.
    pub agents: Vec<AgentView>,
    /// Cells currently holding at least one food unit, x-major order.
    pub food: Vec<Position>,
    /// The deposit cell.
    pub deposit_cell: Position,
    /// Total food units generated so far.
    pub food_generated: u32,
    /// Total food units delivered to the deposit so far.
    pub food_deposited: u32,
    /// Whether the whole food budget has been delivered.
    pub completed: bool,
}

impl TickSnapshot {
    /// Number of agents currently carrying food.
    pub fn carried_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_carrying).count()
    }
}

/// Numeric dump of the grid, indexed `[x][y]`.
///
/// `food` holds the food count per cell with the deposit as
/// [`DEPOSIT_SENTINEL`]. `agents` is the same matrix with 10 added for
/// every agent standing on a cell, which is how the recorder overlays
/// agents onto the food layer.
///
/// [`DEPOSIT_SENTINEL`]: crate::enums::DEPOSIT_SENTINEL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDump {
    /// Food layer.
    pub food: Vec<Vec<i64>>,
    /// Food layer with the agent overlay applied.
    pub agents: Vec<Vec<i64>>,
}
