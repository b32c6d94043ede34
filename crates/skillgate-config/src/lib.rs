//! Layered configuration for the skill request dispatcher.
//!
//! Values are merged by `ortho_config` from, in increasing precedence, the
//! built-in defaults, a TOML file (`.skillgate.toml` or `--config-path`),
//! `SKILLGATE_*` environment variables and command-line flags.
//!
//! | Field                       | Env var                                 | Default |
//! |-----------------------------|-----------------------------------------|---------|
//! | `application_id`            | `SKILLGATE_APPLICATION_ID`              | `""`    |
//! | `skip_application_id_check` | `SKILLGATE_SKIP_APPLICATION_ID_CHECK`   | `false` |
//! | `skip_timestamp_check`      | `SKILLGATE_SKIP_TIMESTAMP_CHECK`        | `false` |
//! | `timestamp_tolerance_secs`  | `SKILLGATE_TIMESTAMP_TOLERANCE_SECS`    | `150`   |
//! | `log_filter`                | `SKILLGATE_LOG_FILTER`                  | `info`  |
//! | `log_format`                | `SKILLGATE_LOG_FORMAT`                  | `json`  |

mod defaults;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_TIMESTAMP_TOLERANCE_SECS, default_log_filter,
    default_log_filter_string, default_log_format, default_timestamp_tolerance_secs,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved dispatcher configuration.
///
/// The application id check and the timestamp check are enabled unless
/// explicitly skipped. Skipping either is meant for local testing against
/// recorded envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "SKILLGATE")]
pub struct Config {
    /// Identifier of the skill this backend serves.
    #[ortho_config(default = String::new())]
    pub application_id: String,
    /// Disables the application identity check.
    #[ortho_config(default = false)]
    pub skip_application_id_check: bool,
    /// Disables the timestamp freshness check.
    #[ortho_config(default = false)]
    pub skip_timestamp_check: bool,
    /// Accepted clock skew for request timestamps, in seconds.
    #[ortho_config(default = default_timestamp_tolerance_secs())]
    pub timestamp_tolerance_secs: u32,
    /// Filter expression for structured logging.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for structured logging.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            application_id: String::new(),
            skip_application_id_check: false,
            skip_timestamp_check: false,
            timestamp_tolerance_secs: default_timestamp_tolerance_secs(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Returns the configured skill identifier.
    #[must_use]
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Returns whether envelopes must carry the configured application id.
    #[must_use]
    pub const fn verify_application_id(&self) -> bool {
        !self.skip_application_id_check
    }

    /// Returns whether request timestamps must be fresh.
    #[must_use]
    pub const fn verify_timestamp(&self) -> bool {
        !self.skip_timestamp_check
    }

    /// Returns the accepted timestamp skew in seconds.
    #[must_use]
    pub const fn timestamp_tolerance_secs(&self) -> u32 {
        self.timestamp_tolerance_secs
    }

    /// Returns the log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}
