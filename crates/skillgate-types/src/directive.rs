//! Platform directives attached to a response.
//!
//! Directives are heterogeneous on the wire: each is a flat object whose
//! `type` names both the interface and the command (`AudioPlayer.Play`,
//! `Dialog.ElicitSlot`, ...). [`Directive`] closes that set. Every variant
//! serialises without an extra tag and deserialisation picks the variant whose
//! command set contains the `type` value.

use serde::{Deserialize, Serialize};

use crate::request::Intent;
use crate::response::PlayBehavior;

/// A platform instruction appended to a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Directive {
    /// Long-form audio playback control.
    AudioPlayer(AudioPlayerDirective),
    /// Multi-turn dialog management.
    Dialog(DialogDirective),
}

impl Directive {
    /// Returns the wire `type` of the directive.
    #[must_use]
    pub const fn directive_type(&self) -> &'static str {
        match self {
            Self::AudioPlayer(directive) => directive.command.as_str(),
            Self::Dialog(directive) => directive.command.as_str(),
        }
    }
}

impl From<AudioPlayerDirective> for Directive {
    fn from(directive: AudioPlayerDirective) -> Self {
        Self::AudioPlayer(directive)
    }
}

impl From<DialogDirective> for Directive {
    fn from(directive: DialogDirective) -> Self {
        Self::Dialog(directive)
    }
}

/// Audio player commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioPlayerCommand {
    /// Start playing a stream.
    #[serde(rename = "AudioPlayer.Play")]
    Play,
    /// Stop the current stream.
    #[serde(rename = "AudioPlayer.Stop")]
    Stop,
    /// Clear the playback queue.
    #[serde(rename = "AudioPlayer.ClearQueue")]
    ClearQueue,
}

impl AudioPlayerCommand {
    /// Returns the wire directive type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Play => "AudioPlayer.Play",
            Self::Stop => "AudioPlayer.Stop",
            Self::ClearQueue => "AudioPlayer.ClearQueue",
        }
    }
}

/// Controls long-form audio playback on the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPlayerDirective {
    /// Command to execute.
    #[serde(rename = "type")]
    pub command: AudioPlayerCommand,
    /// How the stream interacts with the playback queue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_behavior: Option<PlayBehavior>,
    /// Stream to play.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_item: Option<AudioItem>,
}

/// Audio content for a play command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioItem {
    /// Stream definition.
    pub stream: Stream,
}

/// A playable audio stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    /// Opaque token identifying the stream in later playback events.
    pub token: String,
    /// HTTPS location of the audio.
    pub url: String,
    /// Position to start playback from.
    #[serde(default)]
    pub offset_in_milliseconds: u64,
}

/// Dialog management commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialogCommand {
    /// Hand the next turn to the platform's dialog model.
    #[serde(rename = "Dialog.Delegate")]
    Delegate,
    /// Ask the user for a slot value.
    #[serde(rename = "Dialog.ElicitSlot")]
    ElicitSlot,
    /// Ask the user to confirm a slot value.
    #[serde(rename = "Dialog.ConfirmSlot")]
    ConfirmSlot,
    /// Ask the user to confirm the whole intent.
    #[serde(rename = "Dialog.ConfirmIntent")]
    ConfirmIntent,
}

impl DialogCommand {
    /// Returns the wire directive type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delegate => "Dialog.Delegate",
            Self::ElicitSlot => "Dialog.ElicitSlot",
            Self::ConfirmSlot => "Dialog.ConfirmSlot",
            Self::ConfirmIntent => "Dialog.ConfirmIntent",
        }
    }
}

/// Steers a multi-turn dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogDirective {
    /// Command to execute.
    #[serde(rename = "type")]
    pub command: DialogCommand,
    /// Slot the user is prompted for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_to_elicit: Option<String>,
    /// Slot the user is asked to confirm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_to_confirm: Option<String>,
    /// Intent state to carry into the next turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_intent: Option<Intent>,
}
