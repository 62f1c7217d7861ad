//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, metrics)
//! - Serve on a bound listener until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware::from_fn, routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::catalog::ProductStore;
use crate::config::CatalogConfig;
use crate::http::echo::{default_echo, hello};
use crate::http::middleware::track_metrics;
use crate::http::products::product_resource;
use crate::http::request::{request_span, MakeRequestUuid};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// The one product store, shared by every handler.
    pub store: Arc<ProductStore>,
    /// Upper bound for request bodies in bytes.
    pub max_body_size: usize,
    /// Reject POSTs that reuse an existing id.
    pub unique_ids: bool,
}

/// HTTP server for the product catalog.
pub struct HttpServer {
    router: Router,
    config: CatalogConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving `store`.
    pub fn new(config: CatalogConfig, store: Arc<ProductStore>) -> Self {
        let state = AppState {
            store,
            max_body_size: config.limits.max_body_size,
            unique_ids: config.catalog.unique_ids,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &CatalogConfig, state: AppState) -> Router {
        Router::new()
            .route("/", any(default_echo))
            .route("/helloworld", any(hello))
            .route("/products", any(product_resource))
            .route_layer(from_fn(track_metrics))
            .fallback(default_echo)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(request_span))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// A clone of the fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    ///
    /// A closed channel counts as a shutdown signal.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}
