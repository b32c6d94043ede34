//! Error types for envelope validation and dispatch failures.
//!
//! Validation failures are terminal for the request: no partial response is
//! built and the error goes straight back to the caller. Handler failures
//! carry the callback that raised them and keep the handler's own error as
//! the source.

use thiserror::Error;

use crate::handler::{HandlerError, Lifecycle};

/// Part of the envelope whose absence stops dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopePart {
    /// The envelope itself (empty input or a literal `null`).
    Envelope,
    /// The `session` object.
    Session,
    /// The `request` object.
    Request,
}

impl EnvelopePart {
    /// Returns the wire name of the missing part.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Envelope => "envelope",
            Self::Session => "session",
            Self::Request => "request",
        }
    }
}

/// Ways the application identity check can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityMismatch {
    /// The dispatcher has no application id to compare against.
    #[error("no application id is configured")]
    ConfiguredIdEmpty,
    /// The envelope carries no application id.
    #[error("request carries no application id")]
    RequestIdEmpty,
    /// Both ids are present but differ.
    #[error("request application id '{actual}' does not match '{expected}'")]
    Mismatch {
        /// Configured application id.
        expected: String,
        /// Application id found in the session.
        actual: String,
    },
}

/// Errors surfaced while validating and dispatching a request.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The envelope or one of its required objects is absent.
    #[error("missing {}", .part.as_str())]
    MissingEnvelope {
        /// Which part is absent.
        part: EnvelopePart,
    },

    /// Input could not be parsed as a request envelope.
    #[error("malformed envelope: {message}")]
    MalformedEnvelope {
        /// Parser diagnostic.
        message: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The application identity check rejected the envelope.
    #[error("application identity check failed: {0}")]
    ApplicationIdentity(#[from] IdentityMismatch),

    /// The request timestamp is not valid RFC 3339.
    #[error("invalid request timestamp '{timestamp}'")]
    TimestampParse {
        /// Timestamp as received.
        timestamp: String,
        /// Parser diagnostic.
        #[source]
        source: time::error::Parse,
    },

    /// The request timestamp is too far from the server clock.
    #[error("request timestamp is {skew_secs}s from server time, tolerance is {tolerance_secs}s")]
    TimestampOutOfTolerance {
        /// Signed distance from the server clock in whole seconds; positive
        /// when the request is in the past.
        skew_secs: i64,
        /// Configured tolerance.
        tolerance_secs: u32,
    },

    /// A lifecycle callback returned an error.
    #[error("{callback} handler failed")]
    Handler {
        /// Callback that failed.
        callback: Lifecycle,
        /// Error returned by the handler.
        #[source]
        source: HandlerError,
    },

    /// Response serialization failed.
    #[error("failed to serialize response: {0}")]
    SerializeResponse(#[source] serde_json::Error),
}

impl DispatchError {
    /// Returns `true` for rejections of the envelope itself, as opposed to
    /// handler or serialization failures.
    #[must_use]
    pub const fn is_validation_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingEnvelope { .. }
                | Self::MalformedEnvelope { .. }
                | Self::ApplicationIdentity(_)
                | Self::TimestampParse { .. }
                | Self::TimestampOutOfTolerance { .. }
        )
    }

    /// Creates a missing-part error.
    #[must_use]
    pub const fn missing(part: EnvelopePart) -> Self {
        Self::MissingEnvelope { part }
    }

    /// Creates a malformed envelope error from a serde error.
    #[must_use]
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedEnvelope {
            message: source.to_string(),
            source,
        }
    }

    /// Creates a handler error for the given callback.
    #[must_use]
    pub fn handler(callback: Lifecycle, source: HandlerError) -> Self {
        Self::Handler { callback, source }
    }
}
