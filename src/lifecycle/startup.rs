//! Startup orchestration.
//!
//! # Responsibilities
//! - Establish the Brain channel before anything else
//! - Start the metrics endpoint
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - The listener starts last (traffic only when the Brain is reachable)

use std::io;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{ConfigError, GatewayConfig};
use crate::http::{HttpServer, LISTEN_ADDRESS};
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::spawn_signal_handler;
use crate::observability::metrics;
use crate::upstream::{Brain, ConnectError, UpstreamChannel};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to connect to Brain: {0}")]
    Upstream(#[from] ConnectError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

/// Open the process-lifetime channel to the Brain.
pub async fn connect_upstream(config: &GatewayConfig) -> Result<Arc<dyn Brain>, StartupError> {
    match UpstreamChannel::connect(&config.upstream).await {
        Ok(channel) => Ok(Arc::new(channel)),
        Err(e) => {
            tracing::error!(address = %config.upstream.address, error = %e, "Did not connect to Brain");
            Err(e.into())
        }
    }
}

/// Run the gateway until a shutdown signal arrives.
pub async fn run(config: GatewayConfig) -> Result<(), StartupError> {
    let brain = connect_upstream(&config).await?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(LISTEN_ADDRESS)
        .await
        .map_err(|source| StartupError::Bind {
            address: LISTEN_ADDRESS.to_string(),
            source,
        })?;
    tracing::info!(address = LISTEN_ADDRESS, "Server running");

    let shutdown = Arc::new(Shutdown::new());
    spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(&config, brain, shutdown.clone());
    server
        .run(listener, shutdown.subscribe())
        .await
        .map_err(StartupError::Serve)?;

    tracing::info!("Shutdown complete");
    Ok(())
}
