//! Unit and behavioural tests for the dispatcher.

use std::cell::RefCell;

use rstest::fixture;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::types::{
    Application, Context, Request, RequestEnvelope, Response, Session, User,
};
use crate::{Clock, DispatchSettings, Dispatcher, HandlerError, Lifecycle, SkillHandler};

mod dispatcher_tests;

pub(crate) const APP_ID: &str = "amzn1.ask.skill.demo";
pub(crate) const NOW: OffsetDateTime = datetime!(2026-10-19 10:00:00 UTC);
pub(crate) const NOW_RFC3339: &str = "2026-10-19T10:00:00Z";

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedClock(pub(crate) OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// Builds an envelope addressed to [`APP_ID`] and stamped at [`NOW`].
pub(crate) fn envelope(new: bool, request_type: &str) -> RequestEnvelope {
    RequestEnvelope {
        version: String::from("1.0"),
        session: Some(Session {
            new,
            session_id: String::from("amzn1.echo-api.session.1"),
            application: Application {
                application_id: String::from(APP_ID),
            },
            attributes: None,
            user: User {
                user_id: String::from("amzn1.ask.account.user"),
                access_token: None,
            },
        }),
        request: Some(Request {
            locale: String::from("en-US"),
            timestamp: String::from(NOW_RFC3339),
            request_type: String::from(request_type),
            request_id: String::from("amzn1.echo-api.request.1"),
            ..Request::default()
        }),
        context: Context::default(),
    }
}

#[fixture]
pub(crate) fn settings() -> DispatchSettings {
    DispatchSettings::new(APP_ID)
}

pub(crate) fn dispatcher<H>(settings: DispatchSettings, handler: H) -> Dispatcher<H, FixedClock> {
    Dispatcher::new(settings, handler).with_clock(FixedClock(NOW))
}

/// Handler that records which callbacks ran and can be told to fail one.
#[derive(Debug, Default)]
pub(crate) struct RecordingHandler {
    pub(crate) calls: RefCell<Vec<Lifecycle>>,
    pub(crate) failing: Option<Lifecycle>,
    pub(crate) keep_session_open: bool,
}

impl RecordingHandler {
    fn record(&self, callback: Lifecycle, response: &mut Response) -> Result<(), HandlerError> {
        self.calls.borrow_mut().push(callback);
        if self.failing == Some(callback) {
            return Err(format!("{callback} refused").into());
        }
        if callback != Lifecycle::SessionStarted && self.keep_session_open {
            response.set_end_session(false);
        }
        Ok(())
    }

    pub(crate) fn calls(&self) -> Vec<Lifecycle> {
        self.calls.borrow().clone()
    }
}

impl SkillHandler for RecordingHandler {
    fn on_session_started(
        &self,
        _request: &Request,
        session: &mut Session,
        _context: &Context,
        response: &mut Response,
    ) -> Result<(), HandlerError> {
        session.set_attribute("started", true);
        self.record(Lifecycle::SessionStarted, response)
    }

    fn on_launch(
        &self,
        _request: &Request,
        _session: &mut Session,
        _context: &Context,
        response: &mut Response,
    ) -> Result<(), HandlerError> {
        self.record(Lifecycle::Launch, response)
    }

    fn on_intent(
        &self,
        _request: &Request,
        _session: &mut Session,
        _context: &Context,
        response: &mut Response,
    ) -> Result<(), HandlerError> {
        self.record(Lifecycle::Intent, response)
    }

    fn on_session_ended(
        &self,
        _request: &Request,
        _session: &mut Session,
        _context: &Context,
        response: &mut Response,
    ) -> Result<(), HandlerError> {
        self.record(Lifecycle::SessionEnded, response)
    }
}
