//! Response envelopes.
//!
//! # Responsibilities
//! - Pair an HTTP status code with an optional payload and optional message
//! - Provide status-keyed factory functions for the common cases
//! - Serialize uniformly for every handler
//!
//! # Design Decisions
//! - Envelopes are immutable values; "setters" consume and return a new value
//! - Factories are free functions returning a small Copy builder, no trait
//!   hierarchy
//! - The builder holds only the seeded status; every terminal method is
//!   independently callable and side-effect-free

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// A numeric status code outside the valid HTTP range (100-999).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid HTTP status code: {0}")]
pub struct InvalidStatus(pub u16);

/// Immutable response envelope: status, optional payload, optional message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope<T> {
    /// HTTP status code, serialized as its numeric value.
    #[serde(serialize_with = "status_as_u16")]
    status: StatusCode,

    /// Optional payload; omitted from serialized output when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,

    /// Optional human-readable message; omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

fn status_as_u16<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

impl<T> ResponseEnvelope<T> {
    fn new(status: StatusCode, data: Option<T>, message: Option<String>) -> Self {
        Self {
            status,
            data,
            message,
        }
    }

    /// The HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The payload, if any.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// The message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Consume the envelope, taking the payload.
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// A copy of this envelope with a different status.
    pub fn with_status(self, status: StatusCode) -> Self {
        Self { status, ..self }
    }

    /// A copy of this envelope with a different message.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// A copy of this envelope carrying the given payload.
    pub fn with_data<U>(self, data: U) -> ResponseEnvelope<U> {
        ResponseEnvelope {
            status: self.status,
            data: Some(data),
            message: self.message,
        }
    }
}

impl<T: Serialize> IntoResponse for ResponseEnvelope<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

/// Envelope builder seeded with a status code.
///
/// Stateless beyond the status; terminal methods each produce a complete
/// envelope in one step, so no partially constructed envelope is ever
/// observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeBuilder {
    status: StatusCode,
}

impl EnvelopeBuilder {
    /// Envelope with status only.
    pub fn build<T>(self) -> ResponseEnvelope<T> {
        ResponseEnvelope::new(self.status, None, None)
    }

    /// Envelope with status and message.
    pub fn message<T>(self, text: impl Into<String>) -> ResponseEnvelope<T> {
        ResponseEnvelope::new(self.status, None, Some(text.into()))
    }

    /// Envelope with status and payload.
    pub fn body<T>(self, data: T) -> ResponseEnvelope<T> {
        ResponseEnvelope::new(self.status, Some(data), None)
    }

    /// Envelope with status, payload and message.
    pub fn body_with_message<T>(self, data: T, text: impl Into<String>) -> ResponseEnvelope<T> {
        ResponseEnvelope::new(self.status, Some(data), Some(text.into()))
    }
}

/// 200: operation succeeded.
pub fn ok() -> EnvelopeBuilder {
    status(StatusCode::OK)
}

/// 200 with a payload. Shorthand for `ok().body(data)`.
pub fn ok_with<T>(data: T) -> ResponseEnvelope<T> {
    ok().body(data)
}

/// 202: request accepted.
pub fn accepted() -> EnvelopeBuilder {
    status(StatusCode::ACCEPTED)
}

/// 406: operation rejected (failed login, not allowed).
pub fn rejected() -> EnvelopeBuilder {
    status(StatusCode::NOT_ACCEPTABLE)
}

/// 400: malformed request.
pub fn bad_request() -> EnvelopeBuilder {
    status(StatusCode::BAD_REQUEST)
}

/// 403: caller lacks permission.
pub fn forbidden() -> EnvelopeBuilder {
    status(StatusCode::FORBIDDEN)
}

/// 500: internal server error.
pub fn internal_server_error() -> EnvelopeBuilder {
    status(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Builder seeded with an arbitrary status code.
pub fn status(status: StatusCode) -> EnvelopeBuilder {
    EnvelopeBuilder { status }
}

/// Builder seeded with a numeric status code.
///
/// Fails immediately with [`InvalidStatus`] when the code is outside the
/// range `StatusCode` accepts.
pub fn status_code(code: u16) -> Result<EnvelopeBuilder, InvalidStatus> {
    StatusCode::from_u16(code)
        .map(status)
        .map_err(|_| InvalidStatus(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_builds_bare_envelope() {
        let envelope: ResponseEnvelope<()> = ok().build();
        assert_eq!(envelope.status(), StatusCode::OK);
        assert!(envelope.data().is_none());
        assert!(envelope.message().is_none());
    }

    #[test]
    fn test_builder_reentrancy_yields_equal_envelopes() {
        let first: ResponseEnvelope<()> = ok().build();
        let second: ResponseEnvelope<()> = ok().build();
        assert_eq!(first, second);
    }

    #[test]
    fn test_ok_with_preserves_payload() {
        let envelope = ok_with(42);
        assert_eq!(envelope.status(), StatusCode::OK);
        assert_eq!(envelope.data(), Some(&42));
        assert!(envelope.message().is_none());
        assert_eq!(envelope.into_data(), Some(42));
    }

    #[test]
    fn test_ok_with_matches_ok_body() {
        assert_eq!(ok_with("payload"), ok().body("payload"));
    }

    #[test]
    fn test_status_presets() {
        assert_eq!(ok().build::<()>().status().as_u16(), 200);
        assert_eq!(accepted().build::<()>().status().as_u16(), 202);
        assert_eq!(rejected().build::<()>().status().as_u16(), 406);
        assert_eq!(bad_request().build::<()>().status().as_u16(), 400);
        assert_eq!(forbidden().build::<()>().status().as_u16(), 403);
        assert_eq!(internal_server_error().build::<()>().status().as_u16(), 500);
    }

    #[test]
    fn test_forbidden_message_scenario() {
        let envelope: ResponseEnvelope<()> = status(StatusCode::FORBIDDEN).message("no access");
        assert_eq!(envelope.status(), StatusCode::FORBIDDEN);
        assert!(envelope.data().is_none());
        assert_eq!(envelope.message(), Some("no access"));
    }

    #[test]
    fn test_body_with_message_keeps_both_fields() {
        let envelope = accepted().body_with_message(vec![1, 2, 3], "msg");
        assert_eq!(envelope.message(), Some("msg"));
        assert_eq!(envelope.data(), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn test_status_code_validates_range() {
        assert!(status_code(200).is_ok());
        assert!(status_code(999).is_ok());
        assert_eq!(status_code(0), Err(InvalidStatus(0)));
        assert_eq!(status_code(99), Err(InvalidStatus(99)));
        assert_eq!(status_code(1000), Err(InvalidStatus(1000)));
    }

    #[test]
    fn test_invalid_status_display() {
        assert_eq!(
            InvalidStatus(1000).to_string(),
            "invalid HTTP status code: 1000"
        );
    }

    #[test]
    fn test_with_methods_return_new_values() {
        let base: ResponseEnvelope<&str> = ok().body("original");
        let moved = base.clone().with_status(StatusCode::ACCEPTED);
        assert_eq!(base.status(), StatusCode::OK);
        assert_eq!(moved.status(), StatusCode::ACCEPTED);
        assert_eq!(moved.data(), Some(&"original"));

        let with_message = moved.with_message("done");
        assert_eq!(with_message.message(), Some("done"));
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let bare = serde_json::to_value(ok().build::<()>()).unwrap();
        assert_eq!(bare, serde_json::json!({ "status": 200 }));

        let full = serde_json::to_value(forbidden().body_with_message(7, "no access")).unwrap();
        assert_eq!(
            full,
            serde_json::json!({ "status": 403, "data": 7, "message": "no access" })
        );
    }
}
