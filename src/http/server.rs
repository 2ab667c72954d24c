//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the probe handlers
//! - Wire up middleware (session injection, tracing, timeouts)
//! - Bind the server to a listener and serve until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ProbeConfig;
use crate::http::handlers;
use crate::http::session::{session_middleware, SessionStore};
use crate::observability::Logger;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SessionStore>,
    pub config: Arc<ProbeConfig>,
    pub logger: Logger,
}

/// HTTP server for the session probe.
pub struct HttpServer {
    router: Router,
    config: ProbeConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProbeConfig) -> Self {
        let state = AppState {
            store: Arc::new(SessionStore::new()),
            config: Arc::new(config.clone()),
            logger: Logger::named("session_probe::http"),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProbeConfig, state: AppState) -> Router {
        Router::new()
            .route("/request", get(handlers::probe_request))
            .route("/session", get(handlers::probe_session))
            .route("/compare", get(handlers::probe_compare))
            .route("/status", get(handlers::get_status))
            .fallback(handlers::not_found)
            .layer(middleware::from_fn_with_state(
                state.clone(),
                session_middleware,
            ))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self.router.into_make_service();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
