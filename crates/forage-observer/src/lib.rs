//! HTTP polling API for the Forage simulation.
//!
//! This crate wraps a single [`Simulation`] in an Axum server. Clients
//! drive the run: every `GET /` advances it by one tick and returns the
//! new state in the shape visualisation clients expect. Read-only
//! endpoints under `/api` expose the current state without advancing.
//!
//! # Architecture
//!
//! The simulation sits behind a [`tokio::sync::Mutex`] in [`AppState`].
//! Concurrent requests are serialised on that lock, so two polls never
//! run ticks at the same time and each gets its own tick.
//!
//! [`Simulation`]: forage_core::Simulation

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, bind, serve, start_server};
pub use state::AppState;
