//! The agent record.
//!
//! An [`Agent`] is one foraging unit. Its position mirrors its slot on the
//! grid; the tick driver keeps the two in sync after every move. The rally
//! waypoint is the only piece of memory an agent carries from one tick to
//! the next besides its load.

use serde::{Deserialize, Serialize};

use forage_types::{AgentId, AgentView, Behavior, Perception, Position};

use crate::decision::{Decision, decide};
use crate::error::AgentError;

/// What kind of forager an agent is.
///
/// Every agent is currently a generalist. The role still selects the
/// decision rule so that specialised foragers can be added without
/// touching the tick driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Seeks food, carries it home, and walks back to its corner.
    #[default]
    Generalist,
}

impl AgentRole {
    /// Run this role's decision rule.
    pub fn decide(self, perception: &Perception) -> Decision {
        match self {
            Self::Generalist => decide(perception),
        }
    }
}

/// One foraging agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    id: AgentId,
    role: AgentRole,
    position: Position,
    carrying: bool,
    home_corner: Position,
    rally: Option<Position>,
    behavior: Behavior,
}

impl Agent {
    /// Create an agent standing on its spawn cell, which becomes its home
    /// corner.
    pub const fn new(id: AgentId, role: AgentRole, spawn: Position) -> Self {
        Self {
            id,
            role,
            position: spawn,
            carrying: false,
            home_corner: spawn,
            rally: None,
            behavior: Behavior::Wander,
        }
    }

    /// The agent's identifier.
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// The agent's role.
    pub const fn role(&self) -> AgentRole {
        self.role
    }

    /// Where the agent stands.
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Whether the agent holds a food unit.
    pub const fn carrying(&self) -> bool {
        self.carrying
    }

    /// The cell the agent spawned on.
    pub const fn home_corner(&self) -> Position {
        self.home_corner
    }

    /// The pending post-delivery waypoint.
    pub const fn rally(&self) -> Option<Position> {
        self.rally
    }

    /// Behaviour chosen during the last decision.
    pub const fn behavior(&self) -> Behavior {
        self.behavior
    }

    /// Take one food unit into the agent's hands.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::AlreadyCarrying`] if the agent holds a unit.
    pub const fn pick_up(&mut self) -> Result<(), AgentError> {
        if self.carrying {
            return Err(AgentError::AlreadyCarrying {
                agent_id: self.id,
                position: self.position,
            });
        }
        self.carrying = true;
        Ok(())
    }

    /// Hand the carried unit over to the deposit.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NotCarrying`] if the agent holds nothing.
    pub const fn deliver(&mut self) -> Result<(), AgentError> {
        if !self.carrying {
            return Err(AgentError::NotCarrying {
                agent_id: self.id,
                position: self.position,
            });
        }
        self.carrying = false;
        Ok(())
    }

    /// Record the outcome of a decision that has been resolved.
    pub const fn settle(&mut self, decision: &Decision) {
        self.behavior = decision.behavior;
        self.rally = decision.rally;
    }

    /// Mirror a move the grid has already accepted.
    pub const fn relocate(&mut self, to: Position) {
        self.position = to;
    }

    /// The agent as seen from outside the simulation.
    pub const fn view(&self) -> AgentView {
        AgentView {
            id: self.id,
            position: self.position,
            is_carrying: self.carrying,
            behavior: self.behavior,
        }
    }
}
