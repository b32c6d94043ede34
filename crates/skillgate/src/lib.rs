//! Request dispatcher for voice-assistant skill backends.
//!
//! A [`Dispatcher`] takes a decoded [`RequestEnvelope`](types::RequestEnvelope),
//! checks that it is addressed to this skill and is fresh, initialises the
//! session attribute mapping and calls the matching [`SkillHandler`]
//! callbacks. The response the callbacks build is returned inside a
//! [`ResponseEnvelope`](types::ResponseEnvelope) together with a copy of the
//! session attributes.
//!
//! Processing is synchronous and runs entirely on the calling thread.
//!
//! The wire model lives in [`skillgate_types`] and is re-exported as
//! [`types`].

mod clock;
mod dispatcher;
mod errors;
mod handler;
mod settings;
mod validation;

pub use clock::{Clock, SystemClock};
pub use dispatcher::{Dispatch, Dispatcher, Route, parse_envelope};
pub use errors::{DispatchError, EnvelopePart, IdentityMismatch};
pub use handler::{HandlerError, Lifecycle, SkillHandler};
pub use settings::DispatchSettings;
pub use skillgate_types as types;

#[cfg(test)]
pub(crate) use handler::MockSkillHandler;

#[cfg(test)]
mod tests;
