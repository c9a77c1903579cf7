//! Tick cycle, food generation, and run orchestration for the Forage
//! simulation.
//!
//! This crate owns the phase loop that drives the simulation:
//! Perception, Decision, Resolution, Generation, and Audit.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `forage-config.yaml` into
//!   strongly-typed structs.
//! - [`error`] -- [`SimulationError`], the crate's top-level error.
//! - [`generator`] -- [`FoodGenerator`]: periodic food placement.
//! - [`perception`] -- Per-agent perception assembly from world state.
//! - [`runner`] -- Headless run loop, tick callbacks, and history recording.
//! - [`simulation`] -- [`Simulation`]: lifecycle, snapshots, grid dumps.
//! - [`spawn`] -- Spawn points and fleet creation.
//! - [`tick`] -- The phase loop for a single tick.
//!
//! [`FoodGenerator`]: generator::FoodGenerator

pub mod config;
pub mod error;
pub mod generator;
pub mod perception;
pub mod runner;
pub mod simulation;
pub mod spawn;
pub mod tick;

pub use config::SimulationConfig;
pub use error::SimulationError;
pub use runner::{HistoryRecorder, RunReport, TickCallback, run_to_end};
pub use simulation::{Simulation, TickOutcome};
