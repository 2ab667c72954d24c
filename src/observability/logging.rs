//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Provide level-tagged logging entry points that carry a component identity
//! - Render positional `{}` templates before handing records to the sink
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging; the installed subscriber is
//!   the sink, this module never defines output format or persistence
//! - Component identity is always an explicit value: either a pre-bound
//!   [`Logger`] handle or a parameter to the free functions. No call-stack
//!   inspection is performed to discover the caller.
//! - Template rendering never fails: leftover `{}` tokens stay literal when
//!   arguments run out, surplus arguments are ignored

use std::borrow::Cow;
use std::error::Error;
use std::fmt::{Display, Write as _};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Placeholder token substituted for each positional argument.
const PLACEHOLDER: &str = "{}";

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured default directive is
/// used. Call once at startup.
pub fn init(config: &LoggingConfig) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.default_directive)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// A logger handle pre-bound to a component identity.
///
/// Cheap to clone; bind one at component construction time and reuse it on
/// every call site.
#[derive(Debug, Clone)]
pub struct Logger {
    component: Cow<'static, str>,
}

impl Logger {
    /// Create a handle bound to the given component name.
    pub fn named(component: impl Into<Cow<'static, str>>) -> Self {
        Self {
            component: component.into(),
        }
    }

    /// The component identity this handle is bound to.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Emit at TRACE level.
    pub fn trace(&self, template: &str, args: &[&dyn Display]) {
        tracing::trace!(component = %self.component, "{}", render(template, args));
    }

    /// Emit at DEBUG level.
    pub fn debug(&self, template: &str, args: &[&dyn Display]) {
        tracing::debug!(component = %self.component, "{}", render(template, args));
    }

    /// Emit at INFO level.
    pub fn info(&self, template: &str, args: &[&dyn Display]) {
        tracing::info!(component = %self.component, "{}", render(template, args));
    }

    /// Emit at WARN level.
    pub fn warn(&self, template: &str, args: &[&dyn Display]) {
        tracing::warn!(component = %self.component, "{}", render(template, args));
    }

    /// Emit at ERROR level.
    pub fn error(&self, template: &str, args: &[&dyn Display]) {
        tracing::error!(component = %self.component, "{}", render(template, args));
    }

    /// Emit at WARN level with an attached error and its cause chain.
    pub fn warn_with(&self, error: &dyn Error, template: &str, args: &[&dyn Display]) {
        tracing::warn!(
            component = %self.component,
            error = %source_chain(error),
            "{}",
            render(template, args)
        );
    }

    /// Emit at ERROR level with an attached error and its cause chain.
    pub fn error_with(&self, error: &dyn Error, template: &str, args: &[&dyn Display]) {
        tracing::error!(
            component = %self.component,
            error = %source_chain(error),
            "{}",
            render(template, args)
        );
    }
}

/// Emit at TRACE level for the given component.
///
/// Constructs a fresh handle per call; prefer a pre-bound [`Logger`] on hot
/// paths.
pub fn trace(component: &str, template: &str, args: &[&dyn Display]) {
    Logger::named(component.to_owned()).trace(template, args);
}

/// Emit at DEBUG level for the given component.
///
/// Constructs a fresh handle per call; prefer a pre-bound [`Logger`] on hot
/// paths.
pub fn debug(component: &str, template: &str, args: &[&dyn Display]) {
    Logger::named(component.to_owned()).debug(template, args);
}

/// Emit at INFO level for the given component.
///
/// Constructs a fresh handle per call; prefer a pre-bound [`Logger`] on hot
/// paths.
pub fn info(component: &str, template: &str, args: &[&dyn Display]) {
    Logger::named(component.to_owned()).info(template, args);
}

/// Emit at WARN level for the given component.
///
/// Constructs a fresh handle per call; prefer a pre-bound [`Logger`] on hot
/// paths.
pub fn warn(component: &str, template: &str, args: &[&dyn Display]) {
    Logger::named(component.to_owned()).warn(template, args);
}

/// Emit at ERROR level for the given component.
///
/// Constructs a fresh handle per call; prefer a pre-bound [`Logger`] on hot
/// paths.
pub fn error(component: &str, template: &str, args: &[&dyn Display]) {
    Logger::named(component.to_owned()).error(template, args);
}

/// Emit at WARN level with an attached error, for the given component.
pub fn warn_with(component: &str, err: &dyn Error, template: &str, args: &[&dyn Display]) {
    Logger::named(component.to_owned()).warn_with(err, template, args);
}

/// Emit at ERROR level with an attached error, for the given component.
pub fn error_with(component: &str, err: &dyn Error, template: &str, args: &[&dyn Display]) {
    Logger::named(component.to_owned()).error_with(err, template, args);
}

/// Substitute positional `{}` tokens with arguments, in order.
///
/// No validation: when arguments run out the remaining tokens are left in
/// place, and surplus arguments are dropped.
fn render(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut args = args.iter();

    while let Some(pos) = rest.find(PLACEHOLDER) {
        let Some(arg) = args.next() else {
            break;
        };
        out.push_str(&rest[..pos]);
        let _ = write!(out, "{arg}");
        rest = &rest[pos + PLACEHOLDER.len()..];
    }

    out.push_str(rest);
    out
}

/// Join an error with its sources into a single line.
fn source_chain(error: &dyn Error) -> String {
    let mut chain = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let _ = write!(chain, ": {cause}");
        source = cause.source();
    }
    chain
}
