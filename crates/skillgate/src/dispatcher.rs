//! Request validation and lifecycle routing.
//!
//! [`Dispatcher::process`] validates an envelope, initialises the session
//! attribute mapping, calls the lifecycle callbacks and assembles the response
//! envelope. [`Dispatcher::handle_json`] wraps the same flow for raw request
//! bodies.

use skillgate_types::{
    Attributes, Context, Request, RequestEnvelope, RequestType, Response, ResponseEnvelope,
    Session,
};
use tracing::{debug, trace, warn};

use crate::clock::{Clock, SystemClock};
use crate::errors::{DispatchError, EnvelopePart};
use crate::handler::{Lifecycle, SkillHandler};
use crate::settings::DispatchSettings;
use crate::validation::{check_application_identity, check_timestamp};

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Which type-specific callback handled a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `on_launch` ran.
    Launch,
    /// `on_intent` ran.
    Intent,
    /// `on_session_ended` ran.
    SessionEnded,
    /// The request type is not one the dispatcher routes; no callback ran
    /// and the response is the default one.
    Unhandled {
        /// Request type as received.
        request_type: String,
    },
}

impl Route {
    /// Returns the callback that ran, if any.
    #[must_use]
    pub const fn callback(&self) -> Option<Lifecycle> {
        match self {
            Self::Launch => Some(Lifecycle::Launch),
            Self::Intent => Some(Lifecycle::Intent),
            Self::SessionEnded => Some(Lifecycle::SessionEnded),
            Self::Unhandled { .. } => None,
        }
    }
}

/// Successful outcome of [`Dispatcher::process`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    /// Envelope to return to the platform.
    pub response: ResponseEnvelope,
    /// Route the request took.
    pub route: Route,
}

impl Dispatch {
    /// Discards the route and returns the response envelope.
    #[must_use]
    pub fn into_response(self) -> ResponseEnvelope {
        self.response
    }
}

/// Validates request envelopes and routes them to a [`SkillHandler`].
///
/// The dispatcher holds no per-request state. Requests for the same session
/// must be serialised by the caller because the session is mutated in place.
///
/// # Example
///
/// ```
/// use skillgate::{Dispatcher, DispatchSettings, HandlerError, Route, SkillHandler};
/// use skillgate::types::{Context, Request, RequestEnvelope, Response, Session};
///
/// struct Echo;
///
/// impl SkillHandler for Echo {
///     fn on_session_started(&self, _: &Request, _: &mut Session, _: &Context, _: &mut Response)
///         -> Result<(), HandlerError> { Ok(()) }
///     fn on_launch(&self, _: &Request, _: &mut Session, _: &Context, response: &mut Response)
///         -> Result<(), HandlerError> {
///         response.set_output_speech("Hello");
///         Ok(())
///     }
///     fn on_intent(&self, _: &Request, _: &mut Session, _: &Context, _: &mut Response)
///         -> Result<(), HandlerError> { Ok(()) }
///     fn on_session_ended(&self, _: &Request, _: &mut Session, _: &Context, _: &mut Response)
///         -> Result<(), HandlerError> { Ok(()) }
/// }
///
/// let settings = DispatchSettings::new("amzn1.ask.skill.demo").without_timestamp_check();
/// let dispatcher = Dispatcher::new(settings, Echo);
///
/// let mut envelope: RequestEnvelope = serde_json::from_str(r#"{
///     "version": "1.0",
///     "session": {"new": true, "sessionId": "s-1",
///                 "application": {"applicationId": "amzn1.ask.skill.demo"}},
///     "request": {"type": "LaunchRequest", "timestamp": "2026-10-19T10:00:00Z"}
/// }"#).unwrap();
///
/// let dispatch = dispatcher.process(&mut envelope).unwrap();
/// assert_eq!(dispatch.route, Route::Launch);
/// assert!(envelope.session.unwrap().attributes.is_some());
/// ```
#[derive(Debug)]
pub struct Dispatcher<H, C = SystemClock> {
    settings: DispatchSettings,
    handler: H,
    clock: C,
}

impl<H> Dispatcher<H> {
    /// Creates a dispatcher that reads the system clock.
    #[must_use]
    pub const fn new(settings: DispatchSettings, handler: H) -> Self {
        Self {
            settings,
            handler,
            clock: SystemClock,
        }
    }
}

impl<H, C> Dispatcher<H, C> {
    /// Replaces the clock used by the timestamp check.
    #[must_use]
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Dispatcher<H, C2> {
        Dispatcher {
            settings: self.settings,
            handler: self.handler,
            clock,
        }
    }

    /// Returns the validation settings.
    #[must_use]
    pub const fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    /// Returns the skill handler.
    #[must_use]
    pub const fn handler(&self) -> &H {
        &self.handler
    }
}

impl<H: SkillHandler, C: Clock> Dispatcher<H, C> {
    /// Validates `envelope`, runs the lifecycle callbacks and builds the
    /// response envelope.
    ///
    /// The session attribute mapping is initialised in place when absent, so
    /// the caller observes it after the call even if dispatch fails later.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the session or request is missing, the
    /// application id does not match, or the timestamp is malformed or stale.
    /// Returns [`DispatchError::Handler`] when a callback fails; no response is
    /// produced in either case.
    pub fn process(&self, envelope: &mut RequestEnvelope) -> Result<Dispatch, DispatchError> {
        let RequestEnvelope {
            session: maybe_session,
            request: maybe_request,
            context,
            ..
        } = envelope;
        let session = maybe_session
            .as_mut()
            .ok_or(DispatchError::missing(EnvelopePart::Session))?;
        let request = maybe_request
            .as_ref()
            .ok_or(DispatchError::missing(EnvelopePart::Request))?;

        self.validate(session, request)
            .inspect_err(|error| warn!(target: DISPATCH_TARGET, %error, "rejected request"))?;

        session.ensure_attributes();

        let mut response = Response::default();
        if session.new {
            self.invoke(Lifecycle::SessionStarted, request, session, context, &mut response)?;
        }

        let route = match request.kind() {
            Some(RequestType::Launch) => Route::Launch,
            Some(RequestType::Intent) => Route::Intent,
            Some(RequestType::SessionEnded) => Route::SessionEnded,
            None => Route::Unhandled {
                request_type: request.request_type.clone(),
            },
        };
        debug!(
            target: DISPATCH_TARGET,
            session_id = %session.session_id,
            request_type = %request.request_type,
            ?route,
            "routing request"
        );
        match route.callback() {
            Some(callback) => self.invoke(callback, request, session, context, &mut response)?,
            None => debug!(
                target: DISPATCH_TARGET,
                request_type = %request.request_type,
                "no callback for request type"
            ),
        }

        let attributes = copy_attributes(session);
        Ok(Dispatch {
            response: ResponseEnvelope::new(attributes, response),
            route,
        })
    }

    /// Parses a request body, processes it and serialises the response
    /// envelope.
    ///
    /// Trailing whitespace is ignored. Empty input and a literal `null` count
    /// as a missing envelope.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MalformedEnvelope`] when the body is not a
    /// valid envelope, [`DispatchError::SerializeResponse`] when the response
    /// cannot be encoded, and any error from [`Dispatcher::process`].
    pub fn handle_json(&self, input: &[u8]) -> Result<Vec<u8>, DispatchError> {
        let mut envelope = parse_envelope(input)?;
        let dispatch = self.process(&mut envelope)?;
        serde_json::to_vec(&dispatch.response).map_err(DispatchError::SerializeResponse)
    }

    fn validate(&self, session: &Session, request: &Request) -> Result<(), DispatchError> {
        if self.settings.verify_application_id() {
            check_application_identity(self.settings.application_id(), session.application_id())?;
        } else {
            warn!(target: DISPATCH_TARGET, "application identity check is disabled");
        }

        if self.settings.verify_timestamp() {
            check_timestamp(
                &request.timestamp,
                self.clock.now(),
                self.settings.timestamp_tolerance_secs(),
            )?;
        } else {
            warn!(target: DISPATCH_TARGET, "timestamp check is disabled");
        }
        Ok(())
    }

    fn invoke(
        &self,
        callback: Lifecycle,
        request: &Request,
        session: &mut Session,
        context: &Context,
        response: &mut Response,
    ) -> Result<(), DispatchError> {
        debug!(target: DISPATCH_TARGET, callback = callback.as_str(), "invoking callback");
        let result = match callback {
            Lifecycle::SessionStarted => {
                self.handler
                    .on_session_started(request, session, context, response)
            }
            Lifecycle::Launch => self.handler.on_launch(request, session, context, response),
            Lifecycle::Intent => self.handler.on_intent(request, session, context, response),
            Lifecycle::SessionEnded => {
                self.handler
                    .on_session_ended(request, session, context, response)
            }
        };
        result.map_err(|source| {
            warn!(
                target: DISPATCH_TARGET,
                callback = callback.as_str(),
                error = %source,
                "callback failed"
            );
            DispatchError::handler(callback, source)
        })
    }
}

/// Parses a request body into an envelope.
///
/// # Errors
///
/// Returns [`DispatchError::MissingEnvelope`] for empty input or `null`, and
/// [`DispatchError::MalformedEnvelope`] for anything serde rejects.
pub fn parse_envelope(input: &[u8]) -> Result<RequestEnvelope, DispatchError> {
    let trimmed = trim_trailing_whitespace(input);
    if trimmed.is_empty() {
        return Err(DispatchError::missing(EnvelopePart::Envelope));
    }

    serde_json::from_slice::<Option<RequestEnvelope>>(trimmed)
        .map_err(DispatchError::from_json_error)?
        .ok_or(DispatchError::missing(EnvelopePart::Envelope))
}

fn copy_attributes(session: &Session) -> Attributes {
    let attributes = session.attributes.clone().unwrap_or_default();
    for key in attributes.keys() {
        trace!(target: DISPATCH_TARGET, key = key.as_str(), "copying session attribute");
    }
    attributes
}

/// Trims trailing ASCII whitespace from a byte slice.
fn trim_trailing_whitespace(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |pos| pos + 1);
    bytes.get(..end).unwrap_or_default()
}
