//! Read-only device and platform state attached to a request.

use serde::{Deserialize, Serialize};

use crate::nullable::null_as_default;
use crate::session::{Application, User};

/// Snapshot of device and platform state at request time.
///
/// The dispatcher never mutates the context; it is handed to every lifecycle
/// callback by shared reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    /// Audio player status on the device.
    #[serde(rename = "AudioPlayer", default, deserialize_with = "null_as_default")]
    pub audio_player: AudioPlayerState,
    /// Display status on the device.
    #[serde(rename = "Display", default, deserialize_with = "null_as_default")]
    pub display: DisplayState,
    /// Platform, device and API access information.
    #[serde(rename = "System", default, deserialize_with = "null_as_default")]
    pub system: SystemState,
}

impl Context {
    /// Returns `true` when the device advertises the audio player interface.
    #[must_use]
    pub const fn supports_audio_player(&self) -> bool {
        self.system
            .device
            .supported_interfaces
            .audio_player
            .is_some()
    }

    /// Returns `true` when the device advertises a display.
    #[must_use]
    pub const fn supports_display(&self) -> bool {
        self.system.device.supported_interfaces.display.is_some()
    }

    /// Returns the reported player activity, if any.
    #[must_use]
    pub const fn player_activity(&self) -> Option<PlayerActivity> {
        self.audio_player.player_activity
    }
}

/// Audio player state reported by the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPlayerState {
    /// Token of the stream the player last handled.
    #[serde(default, deserialize_with = "null_as_default")]
    pub token: String,
    /// Playback position within that stream.
    #[serde(default, deserialize_with = "null_as_default")]
    pub offset_in_milliseconds: i64,
    /// Current activity of the player.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_activity: Option<PlayerActivity>,
}

/// Activity states of the device audio player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerActivity {
    /// Nothing was playing and no items are enqueued.
    Idle,
    /// The stream was paused.
    Paused,
    /// The stream was playing.
    Playing,
    /// The player ran out of buffered audio.
    BufferUnderrun,
    /// The stream finished playing.
    Finished,
    /// The stream was interrupted.
    Stopped,
    /// An activity this crate does not know about.
    #[serde(other)]
    Unknown,
}

/// Display state reported by the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    /// Token of the template currently rendered.
    #[serde(default, deserialize_with = "null_as_default")]
    pub token: String,
}

/// Platform-level information about the skill, user and device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemState {
    /// Skill the request is addressed to.
    #[serde(default, deserialize_with = "null_as_default")]
    pub application: Application,
    /// End user making the request.
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: User,
    /// Device the request originated from.
    #[serde(default, deserialize_with = "null_as_default")]
    pub device: Device,
    /// Base URL for out-of-band platform API calls.
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_endpoint: String,
    /// Bearer token for out-of-band platform API calls.
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_access_token: String,
}

/// Device identity and capabilities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Platform-assigned device identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub device_id: String,
    /// Interfaces the device supports.
    #[serde(default, deserialize_with = "null_as_default")]
    pub supported_interfaces: SupportedInterfaces,
}

/// Interfaces advertised by a device. Absent entries are unsupported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedInterfaces {
    /// Present when the device can play long-form audio.
    #[serde(rename = "AudioPlayer", default, skip_serializing_if = "Option::is_none")]
    pub audio_player: Option<AudioPlayerInterface>,
    /// Present when the device has a screen.
    #[serde(rename = "Display", default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayInterface>,
}

/// Marker for audio player support; the platform sends an empty object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioPlayerInterface {}

/// Display interface versions supported by the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayInterface {
    /// Supported display template version.
    #[serde(default, deserialize_with = "null_as_default")]
    pub template_version: String,
    /// Supported markup version.
    #[serde(default, deserialize_with = "null_as_default")]
    pub markup_version: String,
}
