//! Error types for the polling API.
//!
//! [`ObserverError`] converts into an Axum response with a JSON body of
//! the form `{"error": "...", "status": 500}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use forage_core::SimulationError;

/// Errors that can occur in the polling API layer.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// The simulation hit an invariant violation and cannot continue.
    #[error("simulation aborted: {0}")]
    Simulation(#[from] SimulationError),

    /// A serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IntoResponse for ObserverError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Simulation(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            Self::Serialization(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("JSON error: {e}"))
            }
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
