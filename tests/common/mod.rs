//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::sync::Arc;

use product_catalog::config::CatalogConfig;
use product_catalog::http::HttpServer;
use product_catalog::lifecycle::Shutdown;
use product_catalog::ProductStore;
use tokio::net::TcpListener;

/// A service running on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub store: Arc<ProductStore>,
    pub shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Start a server with the seed catalog on 127.0.0.1:0.
pub async fn start_server(config: CatalogConfig) -> TestServer {
    let store = Arc::new(ProductStore::seeded());
    start_server_with(config, store).await
}

/// Start a server around an existing store.
#[allow(dead_code)]
pub async fn start_server_with(config: CatalogConfig, store: Arc<ProductStore>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, Arc::clone(&store));
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestServer {
        addr,
        store,
        shutdown,
    }
}
