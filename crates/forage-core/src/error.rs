//! Top-level error type for the forage-core crate.

use forage_world::WorldError;

use crate::config::ConfigError;
use crate::spawn::SpawnError;
use crate::tick::TickError;

/// Errors that can occur while building or running a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// The configuration is invalid.
    #[error("configuration error: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: ConfigError,
    },

    /// The fleet could not be spawned.
    #[error("spawn error: {source}")]
    Spawn {
        /// The underlying spawn error.
        #[from]
        source: SpawnError,
    },

    /// The world could not be built.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// A tick hit an invariant violation.
    #[error("tick {tick} failed: {source}")]
    Tick {
        /// The tick that failed.
        tick: u64,
        /// The underlying tick error.
        source: TickError,
    },

    /// An earlier tick failed; the run cannot continue.
    #[error("simulation aborted at step {step}")]
    Aborted {
        /// Step count when the run was aborted.
        step: u64,
    },
}
