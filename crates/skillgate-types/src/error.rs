//! Errors raised by envelope accessors.

use thiserror::Error;

/// Errors returned when reading values out of a request.
///
/// These are local and recoverable: handler code decides whether a missing
/// slot is an empty answer or a hard failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// The request carries no slot with the given name.
    #[error("slot '{name}' not found in request")]
    SlotNotFound {
        /// Slot name that was looked up.
        name: String,
    },
}

impl EnvelopeError {
    /// Creates a slot-not-found error.
    pub fn slot_not_found(name: impl Into<String>) -> Self {
        Self::SlotNotFound { name: name.into() }
    }
}
