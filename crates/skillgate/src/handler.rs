//! The lifecycle callback seam implemented by each skill.

use std::error::Error;
use std::fmt;

use skillgate_types::{Context, Request, Response, Session};

/// Error type returned by lifecycle callbacks.
///
/// Boxed so that each skill keeps its own error types; the dispatcher passes
/// them through untouched as the source of [`DispatchError::Handler`].
///
/// [`DispatchError::Handler`]: crate::DispatchError::Handler
pub type HandlerError = Box<dyn Error + Send + Sync + 'static>;

/// The four points at which the dispatcher calls into a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// First turn of a new session, before the type-specific callback.
    SessionStarted,
    /// The user opened the skill without a specific request.
    Launch,
    /// The user spoke an intent.
    Intent,
    /// The platform closed the session.
    SessionEnded,
}

impl Lifecycle {
    /// Returns the callback name used in logs and errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SessionStarted => "on_session_started",
            Self::Launch => "on_launch",
            Self::Intent => "on_intent",
            Self::SessionEnded => "on_session_ended",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Lifecycle callbacks supplied by the embedding application.
///
/// Every callback receives the request, the mutable session (whose attribute
/// mapping is always initialised), the read-only context and the response
/// being built. Returning an error aborts the request; the dispatcher then
/// returns no response at all.
///
/// # Example
///
/// ```
/// use skillgate::{HandlerError, SkillHandler};
/// use skillgate::types::{Context, Request, Response, Session};
///
/// struct Greeter;
///
/// impl SkillHandler for Greeter {
///     fn on_session_started(
///         &self,
///         _request: &Request,
///         session: &mut Session,
///         _context: &Context,
///         _response: &mut Response,
///     ) -> Result<(), HandlerError> {
///         session.set_attribute("turns", 0_i64);
///         Ok(())
///     }
///
///     fn on_launch(
///         &self,
///         _request: &Request,
///         _session: &mut Session,
///         _context: &Context,
///         response: &mut Response,
///     ) -> Result<(), HandlerError> {
///         response.set_output_speech("Welcome");
///         response.set_end_session(false);
///         Ok(())
///     }
///
///     fn on_intent(
///         &self,
///         request: &Request,
///         _session: &mut Session,
///         _context: &Context,
///         response: &mut Response,
///     ) -> Result<(), HandlerError> {
///         let genre = request.slot_value("genre")?;
///         response.set_output_speech(format!("Playing {genre}"));
///         Ok(())
///     }
///
///     fn on_session_ended(
///         &self,
///         _request: &Request,
///         _session: &mut Session,
///         _context: &Context,
///         _response: &mut Response,
///     ) -> Result<(), HandlerError> {
///         Ok(())
///     }
/// }
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait SkillHandler {
    /// Called once, before the type-specific callback, when `session.new` is
    /// set.
    ///
    /// # Errors
    ///
    /// Any error aborts the request before the type-specific callback runs.
    fn on_session_started(
        &self,
        request: &Request,
        session: &mut Session,
        context: &Context,
        response: &mut Response,
    ) -> Result<(), HandlerError>;

    /// Called for `LaunchRequest`.
    ///
    /// # Errors
    ///
    /// Any error aborts the request.
    fn on_launch(
        &self,
        request: &Request,
        session: &mut Session,
        context: &Context,
        response: &mut Response,
    ) -> Result<(), HandlerError>;

    /// Called for `IntentRequest`.
    ///
    /// # Errors
    ///
    /// Any error aborts the request.
    fn on_intent(
        &self,
        request: &Request,
        session: &mut Session,
        context: &Context,
        response: &mut Response,
    ) -> Result<(), HandlerError>;

    /// Called for `SessionEndedRequest`.
    ///
    /// # Errors
    ///
    /// Any error aborts the request.
    fn on_session_ended(
        &self,
        request: &Request,
        session: &mut Session,
        context: &Context,
        response: &mut Response,
    ) -> Result<(), HandlerError>;
}
