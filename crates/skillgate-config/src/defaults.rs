use crate::logging::LogFormat;

/// Maximum accepted distance, in seconds, between a request timestamp and the
/// server clock.
pub const DEFAULT_TIMESTAMP_TOLERANCE_SECS: u32 = 150;

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the binaries.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Default timestamp tolerance in seconds.
#[must_use]
pub const fn default_timestamp_tolerance_secs() -> u32 {
    DEFAULT_TIMESTAMP_TOLERANCE_SECS
}
