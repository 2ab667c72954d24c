//! Session Scope Probe Library
//!
//! A small diagnostic web application for exploring the identity semantics
//! of HTTP session handles acquired through different paths.

pub mod config;
pub mod http;
pub mod observability;

pub use config::ProbeConfig;
pub use http::envelope::ResponseEnvelope;
pub use http::HttpServer;
pub use observability::Logger;
