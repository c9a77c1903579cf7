//! Shared type definitions for the Forage simulation.
//!
//! This crate is the single source of truth for the value types that flow
//! between the world model, the agents, the tick driver, and the polling
//! API. Everything here is plain data: no crate in this module mutates
//! simulation state.
//!
//! # Modules
//!
//! - [`ids`] -- Small-integer agent identifiers
//! - [`geometry`] -- Grid [`Position`] and greedy step helpers
//! - [`enums`] -- Cell readings, agent behaviours, end reasons
//! - [`perception`] -- Read-only view handed to an agent each tick
//! - [`snapshot`] -- Post-tick snapshots and grid dumps for consumers

pub mod enums;
pub mod geometry;
pub mod ids;
pub mod perception;
pub mod snapshot;

// Re-export all public types at crate root for convenience.
pub use enums::{Behavior, CellReading, DEPOSIT_SENTINEL, SimulationEndReason};
pub use geometry::Position;
pub use ids::AgentId;
pub use perception::Perception;
pub use snapshot::{AgentView, GridDump, TickSnapshot};
