//! Diagnostic probe handlers.
//!
//! Each endpoint acquires session handles through different paths (the
//! middleware-injected handle versus an on-demand store lookup) and logs
//! their identities side by side, to document that distinct handles refer to
//! the same underlying session.

use axum::extract::{Query, State};
use axum::Extension;
use serde::{Deserialize, Serialize};

use crate::http::envelope::{self, ResponseEnvelope};
use crate::http::server::AppState;
use crate::http::session::SessionHandle;

/// Query parameters accepted by the probe endpoints.
#[derive(Debug, Deserialize)]
pub struct ProbeParams {
    /// Value to store under the session attribute `test`.
    pub test: Option<String>,
}

/// Service status payload.
#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub active_sessions: usize,
}

fn shown(value: Option<&str>) -> &str {
    value.unwrap_or("<unset>")
}

/// `GET /request` — write the `test` query parameter through the injected
/// handle and echo what the session holds afterwards.
pub async fn probe_request(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Query(params): Query<ProbeParams>,
) -> ResponseEnvelope<String> {
    let log = &state.logger;
    let addr = format!("{:#x}", session.addr());

    log.info("session handle for this request: {}", &[&addr]);
    log.info("incoming test parameter: {}", &[&shown(params.test.as_deref())]);

    if let Some(value) = &params.test {
        session.insert("test", value.clone());
    }
    let stored = session.get("test");
    log.info("session attribute `test`: {}", &[&shown(stored.as_deref())]);

    envelope::ok_with(format!(
        "{addr}\n{}",
        shown(params.test.as_deref())
    ))
}

/// `GET /session` — report the injected handle's identity and seed a default
/// attribute when none is present.
pub async fn probe_session(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
) -> ResponseEnvelope<String> {
    let log = &state.logger;

    log.info("injected session id: {}", &[&session.id()]);
    log.info("injected session is new: {}", &[&session.is_new()]);

    if session.get("test").is_none() {
        session.insert("test", "seeded by /session");
    }
    let stored = session.get("test");
    log.info("session attribute `test`: {}", &[&shown(stored.as_deref())]);

    envelope::ok_with(session.id().to_string())
}

/// `GET /compare` — acquire a second handle directly from the store and show
/// that both handles observe the same session: equal ids, equal addresses,
/// writes through one visible through the other.
pub async fn probe_compare(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
) -> ResponseEnvelope<()> {
    let log = &state.logger;

    log.info("injected session id: {}", &[&session.id()]);
    log.info("injected session is new: {}", &[&session.is_new()]);
    log.info(
        "injected handle address: {}",
        &[&format!("{:#x}", session.addr())],
    );

    session.insert("origin", "written through injected handle");

    let Some(direct) = state.store.get(session.id()) else {
        log.error("session {} missing from store", &[&session.id()]);
        return envelope::internal_server_error().message("session missing from store");
    };

    log.info("fetched session id: {}", &[&direct.id()]);
    log.info("fetched session is new: {}", &[&direct.is_new()]);
    log.info(
        "fetched handle address: {}",
        &[&format!("{:#x}", direct.addr())],
    );
    log.info(
        "handles share one session: {}",
        &[&(session.addr() == direct.addr())],
    );

    let origin = direct.get("origin");
    log.info(
        "attribute written via injected handle, read via fetched handle: {}",
        &[&shown(origin.as_deref())],
    );

    envelope::ok().build()
}

/// `GET /status` — service status envelope.
pub async fn get_status(State(state): State<AppState>) -> ResponseEnvelope<SystemStatus> {
    envelope::ok_with(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        active_sessions: state.store.len(),
    })
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ResponseEnvelope<()> {
    envelope::status(axum::http::StatusCode::NOT_FOUND).message("no matching route")
}
