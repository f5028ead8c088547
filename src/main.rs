//! DeFake gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                   GATEWAY                    │
//!   POST /factcheck    │  ┌────────┐    ┌──────────┐    ┌──────────┐  │
//!   ───────────────────┼─▶│  http  │───▶│classifier│───▶│resilience│──┼──▶ Classification
//!                      │  │ server │    │  client  │    │ retries  │  │     Service
//!   ◀──────────────────┼──│        │◀───│          │◀───│(fixed D) │◀─┼───
//!                      │  └────────┘    └──────────┘    └──────────┘  │
//!   POST /check-news   │       │        ┌──────────┐                  │
//!   ───────────────────┼───────┴───────▶│ fallback │                  │
//!                      │                └──────────┘                  │
//!                      │  config · observability · lifecycle          │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use defake_gateway::config::{load_config, validation::warn_on_tight_budget};
use defake_gateway::lifecycle::shutdown_on_signal;
use defake_gateway::observability::{logging, metrics};
use defake_gateway::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "defake-gateway")]
#[command(about = "Fake news checker front end with a resilient classifier bridge", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init_logging(&config.observability);

    tracing::info!("defake-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        mode = %config.classifier.mode,
        max_attempts = config.classifier.max_attempts,
        delay_ms = config.classifier.delay_ms,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );
    warn_on_tight_budget(&config);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    let server = HttpServer::new(config, shutdown)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
