//! Error types for the `forage-world` crate.
//!
//! Every variant here is an invariant violation: the simulation driver
//! treats any of them as fatal for the current run.

use forage_types::{AgentId, Position};

/// Errors that can occur during grid or food-field operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A grid with a zero-length side was requested.
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    EmptyGrid {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A grid side does not fit the coordinate type.
    #[error("grid dimension {name} = {value} exceeds maximum {max}")]
    DimensionTooLarge {
        /// Which side.
        name: &'static str,
        /// Requested length.
        value: u32,
        /// Largest supported length.
        max: u32,
    },

    /// The position lies outside the grid.
    #[error("position {0} is outside the grid")]
    OutOfBounds(Position),

    /// Another agent already occupies the destination cell.
    #[error("cell {position} is already occupied by agent {occupant}")]
    CellOccupied {
        /// The contested cell.
        position: Position,
        /// The agent standing there.
        occupant: AgentId,
    },

    /// The agent was placed twice.
    #[error("agent {0} is already placed on the grid")]
    AgentAlreadyPlaced(AgentId),

    /// The agent has no cell on the grid.
    #[error("agent {0} is not on the grid")]
    AgentNotPlaced(AgentId),

    /// Food operations never target the deposit cell.
    #[error("cell {0} is the deposit and cannot hold food")]
    DepositCell(Position),

    /// A pickup was attempted on a cell with no food.
    #[error("cell {0} has no food to remove")]
    FoodUnderflow(Position),

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in world calculation")]
    ArithmeticOverflow,
}
