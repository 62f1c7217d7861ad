//! Product catalog service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ listener ──▶ middleware ──▶ path match
//!                                  (request id,     │
//!                                   trace, timeout) ├─ /products   ─▶ ProductResource ─┐
//!                                                   ├─ /helloworld ─▶ Echo (hello)     │
//!                                                   └─ / and rest  ─▶ Echo (default)   │
//!                                                                                      ▼
//!     Client Response ◀──────────────────────────── Codec (JSON) ◀──── ProductStore
//!                                                                      (RwLock<Vec>)
//! ```
//!
//! Startup, signal handling and the drain deadline live in `lifecycle`.

use std::path::PathBuf;

use clap::Parser;

use product_catalog::config::{load_config, validation::validate_config, CatalogConfig, ConfigError};
use product_catalog::lifecycle;
use product_catalog::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "product-catalog")]
#[command(about = "In-memory product catalog HTTP service", long_about = None)]
struct Args {
    /// Path to a TOML config file; built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

fn resolve_config(args: &Args) -> Result<CatalogConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => CatalogConfig::default(),
    };

    if let Some(bind) = &args.bind {
        config.listener.bind_address = bind.clone();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    init_logging(&config.observability)?;

    tracing::info!("product-catalog v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        config_file = ?args.config,
        shutdown_grace_secs = config.timeouts.shutdown_grace_secs,
        "Configuration loaded"
    );

    lifecycle::start(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
