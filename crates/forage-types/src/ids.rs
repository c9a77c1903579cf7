//! Agent identifiers.
//!
//! Agents are created once at simulation start and never leave, so a
//! dense small integer is enough. The integer order is also the order in
//! which moves are resolved within a tick.

use serde::{Deserialize, Serialize};

/// Unique identifier for an agent in the simulation.
///
/// Identifiers are assigned densely from zero in spawn order. Lower
/// identifiers are resolved first and therefore win contested cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u32);

impl AgentId {
    /// Create an identifier from its raw index.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Return the raw index.
    pub const fn into_inner(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for AgentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for AgentId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<AgentId> for u32 {
    fn from(id: AgentId) -> Self {
        id.0
    }
}
