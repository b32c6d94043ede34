//! Validation settings fixed when a dispatcher is built.

use skillgate_config::{Config, DEFAULT_TIMESTAMP_TOLERANCE_SECS};

/// Validation settings for a [`Dispatcher`](crate::Dispatcher).
///
/// Both checks are on by default. Tolerance is per dispatcher rather than
/// process-wide, so dispatchers with different settings can coexist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSettings {
    application_id: String,
    verify_application_id: bool,
    verify_timestamp: bool,
    timestamp_tolerance_secs: u32,
}

impl DispatchSettings {
    /// Creates settings that accept only envelopes for `application_id`.
    #[must_use]
    pub fn new(application_id: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            verify_application_id: true,
            verify_timestamp: true,
            timestamp_tolerance_secs: DEFAULT_TIMESTAMP_TOLERANCE_SECS,
        }
    }

    /// Disables the application identity check.
    #[must_use]
    pub const fn without_identity_check(mut self) -> Self {
        self.verify_application_id = false;
        self
    }

    /// Disables the timestamp freshness check.
    #[must_use]
    pub const fn without_timestamp_check(mut self) -> Self {
        self.verify_timestamp = false;
        self
    }

    /// Sets the accepted timestamp skew in seconds.
    #[must_use]
    pub const fn with_timestamp_tolerance(mut self, secs: u32) -> Self {
        self.timestamp_tolerance_secs = secs;
        self
    }

    /// Returns the configured application id.
    #[must_use]
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Returns whether the identity check runs.
    #[must_use]
    pub const fn verify_application_id(&self) -> bool {
        self.verify_application_id
    }

    /// Returns whether the timestamp check runs.
    #[must_use]
    pub const fn verify_timestamp(&self) -> bool {
        self.verify_timestamp
    }

    /// Returns the accepted timestamp skew in seconds.
    #[must_use]
    pub const fn timestamp_tolerance_secs(&self) -> u32 {
        self.timestamp_tolerance_secs
    }
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl From<&Config> for DispatchSettings {
    fn from(config: &Config) -> Self {
        Self {
            application_id: config.application_id().to_owned(),
            verify_application_id: config.verify_application_id(),
            verify_timestamp: config.verify_timestamp(),
            timestamp_tolerance_secs: config.timestamp_tolerance_secs(),
        }
    }
}
