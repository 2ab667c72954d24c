//! Session Scope Probe
//!
//! A small diagnostic web application built with Tokio and Axum. Its probe
//! endpoints acquire HTTP session handles through two paths (the handle the
//! middleware injects into the request versus an on-demand store lookup) and
//! log their identities side by side.
//!
//! # Endpoints
//! - `GET /request` — write a query parameter through the injected handle
//! - `GET /session` — report the injected handle's identity
//! - `GET /compare` — compare injected and store-fetched handles
//! - `GET /status`  — service status

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use session_probe::config::{load_config, ProbeConfig};
use session_probe::http::HttpServer;
use session_probe::observability::logging;

#[derive(Parser)]
#[command(name = "session-probe")]
#[command(about = "Diagnostic web app for session handle scoping", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind address from config.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProbeConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.logging);

    tracing::info!("session-probe v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        cookie_name = %config.session.cookie_name,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
