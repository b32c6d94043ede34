//! Conversational session carried by every request envelope.

use serde::{Deserialize, Serialize};

use crate::attributes::{AttributeValue, Attributes};
use crate::nullable::null_as_default;

/// Identifies a conversational session and carries caller-defined state.
///
/// The session is the one part of an inbound envelope that the dispatcher
/// mutates: the attribute mapping is initialised in place when absent and
/// handlers may write to it. Callers that keep sessions between turns must
/// treat it as an in/out parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// `true` on the first request of a session.
    #[serde(default, deserialize_with = "null_as_default")]
    pub new: bool,
    /// Platform-assigned session identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub session_id: String,
    /// Skill the session belongs to.
    #[serde(default, deserialize_with = "null_as_default")]
    pub application: Application,
    /// Attributes persisted across turns. `None` until initialised.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    /// End user the session belongs to.
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: User,
}

impl Session {
    /// Returns the owning application identifier.
    #[must_use]
    pub const fn application_id(&self) -> &str {
        self.application.application_id.as_str()
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn user_id(&self) -> &str {
        self.user.user_id.as_str()
    }

    /// Returns the attribute mapping, initialising it to empty when absent.
    pub fn ensure_attributes(&mut self) -> &mut Attributes {
        self.attributes.get_or_insert_with(Attributes::new)
    }

    /// Looks up a single attribute.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.as_ref().and_then(|attributes| attributes.get(key))
    }

    /// Stores an attribute, returning the value it replaced.
    pub fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.ensure_attributes().insert(key.into(), value.into())
    }

    /// Removes an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, key: &str) -> Option<AttributeValue> {
        self.attributes
            .as_mut()
            .and_then(|attributes| attributes.remove(key))
    }
}

/// Skill identity as reported by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Application identifier assigned when the skill was registered.
    #[serde(default, deserialize_with = "null_as_default")]
    pub application_id: String,
}

/// End user identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable per-skill user identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: String,
    /// Linked-account token, present once account linking has completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}
