//! Top-level request and response envelopes.

use serde::{Deserialize, Serialize};

use crate::attributes::Attributes;
use crate::context::Context;
use crate::error::EnvelopeError;
use crate::nullable::null_as_default;
use crate::request::{IntentSlot, Request, Slots};
use crate::response::Response;
use crate::session::Session;

/// Protocol version written into every response envelope.
pub const PROTOCOL_VERSION: &str = "1.0";

/// Inbound message delivered by the platform.
///
/// `session` and `request` are optional only so that their absence can be
/// reported as a validation failure instead of a parse error; the dispatcher
/// rejects envelopes missing either.
///
/// # Example
///
/// ```
/// use skillgate_types::RequestEnvelope;
///
/// let envelope: RequestEnvelope = serde_json::from_str(
///     r#"{
///         "version": "1.0",
///         "session": {"new": true, "sessionId": "s-1", "user": {"userId": "u-1"}},
///         "request": {
///             "type": "IntentRequest",
///             "locale": "en-US",
///             "intent": {"name": "PlayIntent", "slots": {"genre": {"name": "genre", "value": "jazz"}}}
///         }
///     }"#,
/// ).unwrap();
///
/// assert_eq!(envelope.intent_name(), Some("PlayIntent"));
/// assert_eq!(envelope.slot_value("genre").unwrap(), "jazz");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Protocol version sent by the platform.
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    /// Conversational session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
    /// Event being delivered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<Request>,
    /// Device and platform state.
    #[serde(default, deserialize_with = "null_as_default")]
    pub context: Context,
}

impl RequestEnvelope {
    /// Returns the session identifier.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session
            .as_ref()
            .map(|session| session.session_id.as_str())
    }

    /// Returns the user identifier.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.session.as_ref().map(Session::user_id)
    }

    /// Returns the wire request type.
    #[must_use]
    pub fn request_type(&self) -> Option<&str> {
        self.request
            .as_ref()
            .map(|request| request.request_type.as_str())
    }

    /// Returns the intent name, falling back to the request type for
    /// non-intent requests.
    #[must_use]
    pub fn intent_name(&self) -> Option<&str> {
        self.request.as_ref().map(Request::intent_name)
    }

    /// Looks up a slot by name.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::SlotNotFound`] when the envelope has no
    /// request, the request has no intent, or the slot is absent.
    pub fn slot(&self, name: &str) -> Result<&IntentSlot, EnvelopeError> {
        self.request
            .as_ref()
            .ok_or_else(|| EnvelopeError::slot_not_found(name))
            .and_then(|request| request.slot(name))
    }

    /// Returns a slot's value verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::SlotNotFound`] when the slot is absent.
    pub fn slot_value(&self, name: &str) -> Result<&str, EnvelopeError> {
        self.slot(name).map(|slot| slot.value.as_str())
    }

    /// Returns every slot of the intent, or `None` without a request.
    #[must_use]
    pub fn all_slots(&self) -> Option<&Slots> {
        self.request.as_ref().map(Request::all_slots)
    }

    /// Returns the request locale.
    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        self.request.as_ref().map(|request| request.locale.as_str())
    }
}

/// Outbound message returned to the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// Protocol version, always [`PROTOCOL_VERSION`] for envelopes built here.
    pub version: String,
    /// Copy of the session attributes after the callbacks ran.
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub session_attributes: Attributes,
    /// Response body.
    pub response: Response,
}

impl ResponseEnvelope {
    /// Wraps a response and a snapshot of the session attributes.
    #[must_use]
    pub fn new(session_attributes: Attributes, response: Response) -> Self {
        Self {
            version: PROTOCOL_VERSION.to_owned(),
            session_attributes,
            response,
        }
    }
}
