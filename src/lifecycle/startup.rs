//! Startup orchestration.
//!
//! This is the composition root: it owns the one [`ProductStore`] and hands
//! it to the HTTP layer.
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusHandle;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::catalog::ProductStore;
use crate::config::CatalogConfig;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::{drain, DrainOutcome, Shutdown};
use crate::lifecycle::signals;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Build the catalog store described by the config.
pub fn build_store(config: &CatalogConfig) -> ProductStore {
    if config.catalog.seed_defaults {
        ProductStore::seeded()
    } else {
        ProductStore::new()
    }
}

/// Install the exporter when enabled, then publish the initial catalog size.
pub fn install_metrics(
    config: &CatalogConfig,
    store: &ProductStore,
) -> Result<Option<PrometheusHandle>, StartupError> {
    let handle = if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        Some(metrics::init_metrics(addr)?)
    } else {
        None
    };

    metrics::record_catalog_size(store.len());
    Ok(handle)
}

/// Run the service until a termination signal arrives or the server fails.
pub async fn start(config: CatalogConfig) -> Result<(), StartupError> {
    let store = Arc::new(build_store(&config));
    tracing::info!(products = store.len(), "Product store ready");

    install_metrics(&config, &store)?;

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let grace = Duration::from_secs(config.timeouts.shutdown_grace_secs);
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, store);
    tracing::info!(
        request_timeout_secs = server.config().timeouts.request_secs,
        max_body_size = server.config().limits.max_body_size,
        unique_ids = server.config().catalog.unique_ids,
        "HTTP server configured"
    );
    let mut task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        signal = signals::termination() => {
            tracing::info!(signal, "Received terminate signal, shutting down gracefully");
        }
        result = &mut task => {
            // The server stopped on its own; nothing left to drain.
            return Ok(result??);
        }
    }

    shutdown.trigger();
    match drain(task, grace).await {
        DrainOutcome::Finished(result) => result?,
        DrainOutcome::Aborted(e) => return Err(e.into()),
        DrainOutcome::TimedOut => {
            tracing::warn!(
                grace_secs = grace.as_secs(),
                "Shutdown deadline passed, abandoning in-flight requests"
            );
        }
    }

    Ok(())
}
