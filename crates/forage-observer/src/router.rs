//! Axum router construction for the polling API.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /` -- advance one tick and return the new frame
/// - `GET /api/state` -- current snapshot without advancing
/// - `GET /api/status` -- step, completion, and food counters
/// - `GET /api/grid` -- numeric grid dump with agent overlay
///
/// CORS allows any origin so browser and game-engine clients on other
/// hosts can poll.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::advance))
        .route("/api/state", get(handlers::get_state))
        .route("/api/status", get(handlers::get_status))
        .route("/api/grid", get(handlers::get_grid))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
