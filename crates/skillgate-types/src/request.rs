//! The event carried by an inbound envelope: request, intent and slots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::EnvelopeError;
use crate::locale::Locale;
use crate::nullable::null_as_default;

/// Slots of an intent, keyed by slot name.
pub type Slots = BTreeMap<String, IntentSlot>;

static NO_SLOTS: Slots = BTreeMap::new();

/// Request types the dispatcher routes to a lifecycle callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestType {
    /// The user opened the skill without a specific intent.
    Launch,
    /// The user's utterance resolved to an intent.
    Intent,
    /// The platform closed the session.
    SessionEnded,
}

impl RequestType {
    /// Parses a wire request type. Unknown types yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "LaunchRequest" => Some(Self::Launch),
            "IntentRequest" => Some(Self::Intent),
            "SessionEndedRequest" => Some(Self::SessionEnded),
            _ => None,
        }
    }

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Launch => "LaunchRequest",
            Self::Intent => "IntentRequest",
            Self::SessionEnded => "SessionEndedRequest",
        }
    }
}

/// The specific event a request envelope describes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Locale of the utterance, for example `en-US`.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub locale: String,
    /// RFC 3339 time at which the platform issued the request.
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    /// Wire request type, for example `IntentRequest`.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub request_type: String,
    /// Platform-assigned request identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub request_id: String,
    /// Dialog progress for multi-turn dialogs (`STARTED`, `IN_PROGRESS`,
    /// `COMPLETED`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog_state: Option<String>,
    /// Resolved intent; present on intent requests only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    /// Event name used by some platform-originated requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Why the session ended; present on session-ended requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Request {
    /// Returns the routed request type, or `None` for unrecognised types.
    #[must_use]
    pub fn kind(&self) -> Option<RequestType> {
        RequestType::parse(&self.request_type)
    }

    /// Returns the locale as a known [`Locale`], if it is one.
    #[must_use]
    pub fn known_locale(&self) -> Option<Locale> {
        self.locale.parse().ok()
    }

    /// Returns the intent name for intent requests and the request type
    /// otherwise.
    ///
    /// An intent request without an intent yields an empty name.
    #[must_use]
    pub fn intent_name(&self) -> &str {
        if self.kind() == Some(RequestType::Intent) {
            return self
                .intent
                .as_ref()
                .map_or("", |intent| intent.name.as_str());
        }
        &self.request_type
    }

    /// Returns every slot of the intent; empty when there is no intent.
    #[must_use]
    pub fn all_slots(&self) -> &Slots {
        self.intent.as_ref().map_or(&NO_SLOTS, |intent| &intent.slots)
    }

    /// Looks up a slot by name.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::SlotNotFound`] when the request has no intent
    /// or the intent has no slot with that name.
    pub fn slot(&self, name: &str) -> Result<&IntentSlot, EnvelopeError> {
        self.all_slots()
            .get(name)
            .ok_or_else(|| EnvelopeError::slot_not_found(name))
    }

    /// Returns a slot's value verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::SlotNotFound`] when the slot is absent.
    pub fn slot_value(&self, name: &str) -> Result<&str, EnvelopeError> {
        self.slot(name).map(|slot| slot.value.as_str())
    }
}

/// An intent resolved from the user's utterance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    /// Intent name, for example `AMAZON.HelpIntent`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Whether the user confirmed the intent as a whole.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_status: Option<ConfirmationStatus>,
    /// Slot values keyed by slot name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub slots: Slots,
}

impl Intent {
    /// Creates an intent with no slots.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a slot, keyed by its name.
    #[must_use]
    pub fn with_slot(mut self, slot: IntentSlot) -> Self {
        self.slots.insert(slot.name.clone(), slot);
        self
    }

    /// Sets the intent confirmation status.
    #[must_use]
    pub const fn with_confirmation(mut self, status: ConfirmationStatus) -> Self {
        self.confirmation_status = Some(status);
        self
    }

    /// Returns the built-in intent this intent names, if any.
    #[must_use]
    pub fn built_in(&self) -> Option<BuiltInIntent> {
        self.name.parse().ok()
    }
}

/// One named slot of an intent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentSlot {
    /// Slot name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Whether the user confirmed this slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_status: Option<ConfirmationStatus>,
    /// Value as heard; empty when the slot was not filled.
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    /// Entity resolution results, when the slot type defines synonyms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolutions: Option<Resolutions>,
}

impl IntentSlot {
    /// Creates a slot holding `value`.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Iterates over every resolved value across all authorities.
    pub fn resolved_values(&self) -> impl Iterator<Item = &ResolutionValue> {
        self.resolutions
            .iter()
            .flat_map(|resolutions| &resolutions.resolutions_per_authority)
            .flat_map(|authority| &authority.values)
            .flat_map(BTreeMap::values)
    }
}

/// Entity resolution results for a slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolutions {
    /// Results from each authority that attempted resolution.
    #[serde(default, deserialize_with = "null_as_default")]
    pub resolutions_per_authority: Vec<ResolutionPerAuthority>,
}

/// Resolution result from a single authority.
///
/// Each entry of `values` wraps one candidate under a `value` key, mirroring
/// the platform payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionPerAuthority {
    /// Authority identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub authority: String,
    /// Outcome of the resolution attempt.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ResolutionStatus,
    /// Matching candidates.
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: Vec<BTreeMap<String, ResolutionValue>>,
}

/// Status of a resolution attempt, for example `ER_SUCCESS_MATCH`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionStatus {
    /// Status code reported by the authority.
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
}

/// A canonical value a slot resolved to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionValue {
    /// Canonical name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Canonical identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
}

/// Confirmation state of an intent or slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfirmationStatus {
    /// The user confirmed.
    Confirmed,
    /// The user declined.
    Denied,
    /// The user has neither confirmed nor declined.
    None,
    /// A status this crate does not know about.
    #[serde(other)]
    Unknown,
}

/// Built-in intents the platform provides to every skill.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
pub enum BuiltInIntent {
    /// The user asked for help.
    #[strum(serialize = "AMAZON.HelpIntent")]
    Help,
    /// The user cancelled the current interaction.
    #[strum(serialize = "AMAZON.CancelIntent")]
    Cancel,
    /// The user asked the skill to stop.
    #[strum(serialize = "AMAZON.StopIntent")]
    Stop,
    /// The user paused playback.
    #[strum(serialize = "AMAZON.PauseIntent")]
    Pause,
    /// The user asked to start over.
    #[strum(serialize = "AMAZON.StartOverIntent")]
    StartOver,
    /// The user asked to hear the last response again.
    #[strum(serialize = "AMAZON.RepeatIntent")]
    Repeat,
}

impl BuiltInIntent {
    /// Returns the wire intent name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
