pub mod alert;
pub mod api;
pub mod chat;
pub mod config;
pub mod errors;
pub mod message;
pub mod metrics_defs;
pub mod severity;
pub mod threading;

#[cfg(test)]
pub(crate) mod testutils;

use tokio::net::TcpListener;

use crate::api::RelayState;
use crate::config::RelayConfig;
use crate::errors::RelayError;

/// Binds the configured listener and serves the relay until shutdown.
pub async fn run(config: RelayConfig) -> Result<(), RelayError> {
    let state = RelayState::from_config(&config)?;
    let app = api::app(state);

    let addr = format!("{}:{}", config.listener.host, config.listener.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "alert relay listening");

    axum::serve(listener, app).await?;
    Ok(())
}
