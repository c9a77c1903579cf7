//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup and the run itself.

use std::path::PathBuf;

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: forage_core::config::ConfigError,
    },

    /// Building or running the simulation failed.
    #[error("simulation error: {source}")]
    Simulation {
        /// The underlying simulation error.
        #[from]
        source: forage_core::SimulationError,
    },

    /// The polling API server failed.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: forage_observer::ServerError,
    },

    /// The explicitly requested config file does not exist.
    #[error("config file not found: {}", path.display())]
    MissingConfig {
        /// The requested path.
        path: PathBuf,
    },

    /// Writing the run history failed.
    #[error("failed to write history to {}: {source}", path.display())]
    History {
        /// Destination file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Encoding the run history failed.
    #[error("failed to encode history: {0}")]
    HistoryEncode(#[from] serde_json::Error),
}
