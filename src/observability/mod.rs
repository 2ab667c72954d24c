//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (level-tagged events with component identity)
//!
//! Consumers:
//!     → the installed tracing subscriber (stdout, file, remote)
//! ```
//!
//! # Design Decisions
//! - The facade is a thin layer over tracing; the subscriber is the sink
//! - Component identity is explicit, never recovered from the call stack

pub mod logging;

pub use logging::Logger;
