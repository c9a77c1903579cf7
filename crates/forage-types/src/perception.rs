//! Perception payload handed to an agent each tick.
//!
//! The perception is the **only** information an agent receives about the
//! world. It is assembled from the start-of-tick state before any agent
//! acts, so every agent in a tick decides against the same snapshot.

use serde::{Deserialize, Serialize};

use crate::enums::CellReading;
use crate::geometry::Position;
use crate::ids::AgentId;

/// Everything an agent may know when it decides.
///
/// Note what is absent: the deposit location is only present once the
/// shared ledger has latched it as found, and food is only visible through
/// the agent's own cell and the ledger's known-food set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perception {
    /// Tick being decided.
    pub tick: u64,
    /// The perceiving agent.
    pub agent_id: AgentId,
    /// Where the agent stands.
    pub position: Position,
    /// Whether the agent holds a food unit.
    pub carrying: bool,
    /// The agent's rally corner.
    pub home_corner: Position,
    /// Pending post-delivery waypoint, if any.
    pub rally: Option<Position>,
    /// Contents of the cell the agent stands on.
    pub cell: CellReading,
    /// Deposit location, present only once it has been discovered.
    pub known_deposit: Option<Position>,
    /// Closest known food cell by Euclidean distance, first-inserted on ties.
    pub nearest_known_food: Option<Position>,
}
