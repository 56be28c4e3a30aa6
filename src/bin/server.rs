//! Paxboard Metrics Server
//!
//! Run with: cargo run --bin paxboard-server
//!
//! # Configuration
//!
//! Reads the same config file as the CLI (`--config PATH`, or the standard
//! locations). Environment variables:
//! - `PAXBOARD_SERVER_HOST`: Host to bind to (default: 0.0.0.0)
//! - `PAXBOARD_SERVER_PORT`: Port to listen on (default: 8080)
//! - `PAXBOARD_LOG_LEVEL`, `PAXBOARD_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Log filter (wins over the configured level)

use clap::Parser;
use std::path::PathBuf;

use paxboard::api::{serve, AppState};
use paxboard::config::Config;

#[derive(Parser)]
#[command(name = "paxboard-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Synthetic revenue and passenger metrics API")]
struct Args {
    /// Config file (default: search standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load_from(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    paxboard::logging::init(&config.logging);

    tracing::info!("Starting Paxboard metrics server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(max_points = config.server.max_points, "Series span limit");

    let state = AppState::new(config.server.clone());
    serve(state, &config.server).await?;

    tracing::info!("Paxboard metrics server stopped");
    Ok(())
}
