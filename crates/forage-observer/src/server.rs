//! Polling API server lifecycle.
//!
//! [`start_server`] binds the configured address and serves until `Ctrl-C`.
//! [`bind`] and [`serve`] are the two halves, split so a caller can bind
//! an ephemeral port or supply its own shutdown future.

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::router::build_router;
use crate::state::AppState;

/// Where the polling API listens.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host name or address, e.g. `0.0.0.0`.
    pub host: String,
    /// TCP port; `0` picks an ephemeral one.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8585,
        }
    }
}

/// Bind a listener for `config`.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the host does not resolve or the port
/// is unavailable.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, ServerError> {
    TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(|source| ServerError::Bind {
            host: config.host.clone(),
            port: config.port,
            source,
        })
}

/// Serve the polling API on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns [`ServerError::Serve`] on a fatal I/O error.
pub async fn serve<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Polling API listening");
    }

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|source| ServerError::Serve { source })?;

    info!("Polling API stopped");
    Ok(())
}

/// Bind and serve until `Ctrl-C`.
///
/// # Errors
///
/// Returns [`ServerError`] if binding or serving fails.
pub async fn start_server(config: &ServerConfig, state: Arc<AppState>) -> Result<(), ServerError> {
    let listener = bind(config).await?;
    serve(listener, state, ctrl_c()).await
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Ctrl-C handler unavailable, stopping");
    }
}

/// Errors from the server lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The listener could not be bound.
    #[error("cannot bind {host}:{port}: {source}")]
    Bind {
        /// Requested host.
        host: String,
        /// Requested port.
        port: u16,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Serving stopped on an I/O error.
    #[error("serve failed: {source}")]
    Serve {
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
