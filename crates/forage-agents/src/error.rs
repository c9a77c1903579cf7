//! Error types for the forage-agents crate.
//!
//! A failing state change means resolution tried to apply a decision that
//! no longer matches the agent. These are invariant violations: the tick
//! driver aborts the run when it sees one.

use forage_types::{AgentId, Position};

/// Errors that can occur during agent state changes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    /// The agent tried to pick up food while already holding a unit.
    #[error("agent {agent_id} at {position} is already carrying food")]
    AlreadyCarrying {
        /// The agent.
        agent_id: AgentId,
        /// Where the pickup was attempted.
        position: Position,
    },

    /// The agent tried to deliver without holding anything.
    #[error("agent {agent_id} at {position} has nothing to deliver")]
    NotCarrying {
        /// The agent.
        agent_id: AgentId,
        /// Where the delivery was attempted.
        position: Position,
    },
}
