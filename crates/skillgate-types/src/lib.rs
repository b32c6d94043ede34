//! Wire model for voice-assistant skill requests and responses.
//!
//! This crate defines the JSON envelopes exchanged between the platform and a
//! skill backend, with field names matching the platform contract exactly. It
//! is shared by the `skillgate` dispatcher and by embedding applications that
//! implement lifecycle callbacks.
//!
//! # Core types
//!
//! - [`RequestEnvelope`], with [`Session`], [`Request`] and [`Context`]
//! - [`Intent`] and [`IntentSlot`], plus entity [`Resolutions`]
//! - [`ResponseEnvelope`] and the mutable [`Response`] body
//! - [`Directive`], the closed set of audio player and dialog directives
//! - [`AttributeValue`], the typed form of session attributes
//! - [`Locale`], [`BuiltInIntent`] and the other fixed enumerations
//!
//! # Example
//!
//! ```
//! use skillgate_types::{Response, ResponseEnvelope, Attributes};
//!
//! let mut response = Response::default();
//! response.set_simple_card("T", "C");
//! let envelope = ResponseEnvelope::new(Attributes::new(), response);
//!
//! let json = serde_json::to_value(&envelope).unwrap();
//! assert_eq!(json["response"]["card"]["type"], "Simple");
//! assert!(json.get("sessionAttributes").is_none());
//! ```

mod attributes;
mod context;
mod directive;
mod envelope;
mod error;
mod locale;
mod nullable;
mod request;
mod response;
mod session;

pub use attributes::{AttributeValue, Attributes};
pub use context::{
    AudioPlayerInterface, AudioPlayerState, Context, Device, DisplayInterface, DisplayState,
    PlayerActivity, SupportedInterfaces, SystemState,
};
pub use directive::{
    AudioItem, AudioPlayerCommand, AudioPlayerDirective, DialogCommand, DialogDirective,
    Directive, Stream,
};
pub use envelope::{PROTOCOL_VERSION, RequestEnvelope, ResponseEnvelope};
pub use error::EnvelopeError;
pub use locale::{Locale, is_english};
pub use request::{
    BuiltInIntent, ConfirmationStatus, Intent, IntentSlot, Request, RequestType,
    ResolutionPerAuthority, ResolutionStatus, ResolutionValue, Resolutions, Slots,
};
pub use response::{
    Card, CardType, Image, OutputSpeech, PlayBehavior, Reprompt, Response, SpeechType,
};
pub use session::{Application, Session, User};

#[cfg(test)]
mod tests;
