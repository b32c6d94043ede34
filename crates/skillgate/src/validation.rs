//! Envelope checks run before any callback.

use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

use crate::errors::{DispatchError, IdentityMismatch};

/// Compares the configured application id with the one in the request.
///
/// Both must be non-empty and equal byte for byte.
pub(crate) fn check_application_identity(
    configured: &str,
    requested: &str,
) -> Result<(), IdentityMismatch> {
    if configured.is_empty() {
        return Err(IdentityMismatch::ConfiguredIdEmpty);
    }
    if requested.is_empty() {
        return Err(IdentityMismatch::RequestIdEmpty);
    }
    if configured != requested {
        return Err(IdentityMismatch::Mismatch {
            expected: configured.to_owned(),
            actual: requested.to_owned(),
        });
    }
    Ok(())
}

/// Parses an RFC 3339 timestamp and rejects it when it lies further than
/// `tolerance_secs` from `now` in either direction.
pub(crate) fn check_timestamp(
    timestamp: &str,
    now: OffsetDateTime,
    tolerance_secs: u32,
) -> Result<(), DispatchError> {
    let sent = OffsetDateTime::parse(timestamp, &Rfc3339).map_err(|source| {
        DispatchError::TimestampParse {
            timestamp: timestamp.to_owned(),
            source,
        }
    })?;

    let skew = now - sent;
    if skew.abs() > Duration::seconds(i64::from(tolerance_secs)) {
        return Err(DispatchError::TimestampOutOfTolerance {
            skew_secs: skew.whole_seconds(),
            tolerance_secs,
        });
    }
    Ok(())
}
