//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware layers)
//!     → session.rs (resolve/create session, inject handle)
//!     → handlers.rs (probe endpoints, diagnostic log lines)
//!     → envelope.rs (uniform response shape)
//!     → Send to client
//! ```

pub mod envelope;
pub mod handlers;
pub mod server;
pub mod session;

pub use envelope::{EnvelopeBuilder, InvalidStatus, ResponseEnvelope};
pub use server::HttpServer;
pub use session::{SessionHandle, SessionStore};
