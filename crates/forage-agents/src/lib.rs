//! Agent state, decisions, and movement for the Forage simulation.
//!
//! This crate implements the agent side of the tick cycle:
//!
//! - [`agent`] -- The [`Agent`] record and its role.
//! - [`decision`] -- The pure per-tick decision: observe the cell,
//!   pick a target, plan a move.
//! - [`movement`] -- Greedy step candidates and move resolution against
//!   the live grid.
//! - [`error`] -- Error types for agent state changes.
//!
//! Agents never mutate the world directly. A decision is a description of
//! what the agent wants; the tick driver applies it during resolution.

pub mod agent;
pub mod decision;
pub mod error;
pub mod movement;

pub use agent::{Agent, AgentRole};
pub use decision::{Decision, Effect, MovePlan, decide};
pub use error::AgentError;
