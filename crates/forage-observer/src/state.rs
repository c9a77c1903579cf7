//! Shared application state for the polling API.

use std::sync::Arc;

use tokio::sync::Mutex;

use forage_core::Simulation;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. The
/// mutex is held for the whole of a tick so concurrent polls queue up.
#[derive(Clone)]
pub struct AppState {
    /// The simulation being served.
    pub simulation: Arc<Mutex<Simulation>>,
}

impl AppState {
    /// Wrap a freshly built simulation.
    pub fn new(simulation: Simulation) -> Self {
        Self {
            simulation: Arc::new(Mutex::new(simulation)),
        }
    }
}
