//! In-memory session store and request-scoped session handles.
//!
//! # Responsibilities
//! - Resolve or create a session from the request cookie
//! - Hand each request a session handle via request extensions
//! - Issue the session cookie on first contact
//!
//! # Design Decisions
//! - Handles are explicit `Arc`s, not proxies: every acquisition path hands
//!   out a clone pointing at the same underlying session, which is exactly
//!   what the probe endpoints demonstrate
//! - Attributes are a flat string map; this is a diagnostic tool, not a
//!   general session framework
//! - No expiry. Sessions live until the process exits.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use dashmap::DashMap;
use uuid::Uuid;

use crate::http::server::AppState;

/// A single session: identifier plus a mutable attribute map.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    attributes: RwLock<HashMap<String, String>>,
}

impl Session {
    fn new(id: Uuid) -> Self {
        Self {
            id,
            attributes: RwLock::new(HashMap::new()),
        }
    }
}

/// A handle to a session, as seen by one acquisition path.
///
/// Clones share the underlying session. `is_new` reports whether this
/// request created the session rather than finding it via cookie.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    session: Arc<Session>,
    fresh: bool,
}

impl SessionHandle {
    /// The session identifier.
    pub fn id(&self) -> Uuid {
        self.session.id
    }

    /// Whether the session was created for the current request.
    pub fn is_new(&self) -> bool {
        self.fresh
    }

    /// Address of the underlying session allocation.
    ///
    /// Two handles with equal addresses share one session, whatever path
    /// produced them. This is the diagnostic analog of comparing object
    /// identity.
    pub fn addr(&self) -> usize {
        Arc::as_ptr(&self.session) as usize
    }

    /// Read an attribute.
    pub fn get(&self, key: &str) -> Option<String> {
        self.session
            .attributes
            .read()
            .ok()
            .and_then(|attributes| attributes.get(key).cloned())
    }

    /// Write an attribute.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut attributes) = self.session.attributes.write() {
            attributes.insert(key.into(), value.into());
        }
    }
}

/// Thread-safe registry of live sessions.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<Uuid, Arc<Session>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an existing session by id.
    pub fn get(&self, id: Uuid) -> Option<SessionHandle> {
        self.sessions.get(&id).map(|entry| SessionHandle {
            session: entry.value().clone(),
            fresh: false,
        })
    }

    /// Create a new session and register it.
    pub fn create(&self) -> SessionHandle {
        let id = Uuid::new_v4();
        let session = Arc::new(Session::new(id));
        self.sessions.insert(id, session.clone());
        SessionHandle {
            session,
            fresh: true,
        }
    }

    /// Resolve the session for a request: reuse when the id is known,
    /// create otherwise.
    pub fn resolve(&self, id: Option<Uuid>) -> SessionHandle {
        id.and_then(|id| self.get(id)).unwrap_or_else(|| self.create())
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Middleware injecting a session handle into request extensions.
///
/// Resolves the session from the configured cookie, makes the handle
/// available to handlers, and appends `Set-Cookie` for sessions created by
/// this request.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie_name = state.config.session.cookie_name.clone();
    let existing = request
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|cookies| parse_session_cookie(cookies, &cookie_name));

    let handle = state.store.resolve(existing);
    let fresh = handle.is_new();
    let id = handle.id();
    request.extensions_mut().insert(handle);

    let mut response = next.run(request).await;

    if fresh {
        let cookie = format!("{cookie_name}={id}; Path=/; HttpOnly");
        if let Ok(value) = header::HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    response
}

/// Extract a session id from a `Cookie` header value.
fn parse_session_cookie(header: &str, name: &str) -> Option<Uuid> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}
