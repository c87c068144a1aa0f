//! API Hub
//!
//! Forwards `/{service}/{rest...}` to `https://{host}/{rest...}` for a fixed
//! registry of upstream APIs and serves a landing page at `/`.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ axum server ──▶ cors (OPTIONS → 204)
//!                                         │
//!                                         ▼
//!                                  routing::Router ──▶ registry lookup
//!                                         │
//!              ┌──────────────┬───────────┼──────────────┐
//!              ▼              ▼           ▼              ▼
//!         landing page   302 to /    400 invalid   http::proxy::Dispatcher
//!                                                        │
//!     Client Response                                    ▼
//!     ◀──────────────────── streamed upstream response ◀── https://{host}
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use api_hub::config::{load_config, ProxyConfig};
use api_hub::observability::{logging, metrics};
use api_hub::{HttpServer, Shutdown};

#[derive(Parser, Debug)]
#[command(name = "api-hub")]
#[command(about = "Path-based reverse proxy for a fixed set of HTTPS APIs")]
struct Cli {
    /// Path to a TOML config file. Built-in services are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listening port (overrides the config file).
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(port) = cli.port {
        config.listener.port = port;
    }

    logging::init(&config.observability.log_level);
    tracing::info!("api-hub v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.socket_address(),
        services = config.services.len(),
        upstream_scheme = %config.upstream.scheme,
        config_file = ?cli.config,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(config.listener.socket_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
