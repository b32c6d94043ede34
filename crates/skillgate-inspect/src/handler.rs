//! Skill handler that records callbacks and echoes the request back.

use std::cell::RefCell;

use skillgate::{HandlerError, Lifecycle, SkillHandler};
use skillgate_types::{Context, Request, Response, Session, is_english};

/// Attribute counting the turns seen in a session.
pub const TURN_ATTRIBUTE: &str = "inspectTurns";

/// Handler used by the inspector.
///
/// Each callback is recorded in invocation order. Launch and intent requests
/// receive a short spoken summary and a simple card listing the slots, so the
/// printed response exercises the usual response helpers.
#[derive(Debug, Default)]
pub struct InspectHandler {
    invoked: RefCell<Vec<Lifecycle>>,
}

impl InspectHandler {
    /// Creates a handler with an empty call log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the callbacks invoked so far, in order.
    #[must_use]
    pub fn invoked(&self) -> Vec<Lifecycle> {
        self.invoked.borrow().clone()
    }

    fn record(&self, callback: Lifecycle) {
        self.invoked.borrow_mut().push(callback);
    }
}

fn count_turn(session: &mut Session) {
    let turns = session
        .attribute(TURN_ATTRIBUTE)
        .and_then(|value| value.as_u64())
        .unwrap_or(0);
    session.set_attribute(TURN_ATTRIBUTE, turns.saturating_add(1));
}

fn greeting(request: &Request) -> &'static str {
    if is_english(&request.locale) || request.locale.is_empty() {
        "Request received"
    } else {
        "Request received (non-English locale)"
    }
}

impl SkillHandler for InspectHandler {
    fn on_session_started(
        &self,
        _request: &Request,
        _session: &mut Session,
        _context: &Context,
        _response: &mut Response,
    ) -> Result<(), HandlerError> {
        self.record(Lifecycle::SessionStarted);
        Ok(())
    }

    fn on_launch(
        &self,
        request: &Request,
        session: &mut Session,
        _context: &Context,
        response: &mut Response,
    ) -> Result<(), HandlerError> {
        self.record(Lifecycle::Launch);
        count_turn(session);
        response.set_output_speech(format!("{}: launch", greeting(request)));
        response.set_reprompt_text("What would you like to do?");
        response.set_end_session(false);
        Ok(())
    }

    fn on_intent(
        &self,
        request: &Request,
        session: &mut Session,
        _context: &Context,
        response: &mut Response,
    ) -> Result<(), HandlerError> {
        self.record(Lifecycle::Intent);
        count_turn(session);
        let name = request.intent_name();
        let slots = request
            .all_slots()
            .iter()
            .map(|(slot, value)| format!("{slot}={}", value.value))
            .collect::<Vec<_>>()
            .join(", ");
        response.set_output_speech(format!("{}: {name}", greeting(request)));
        response.set_simple_card(name, slots);
        Ok(())
    }

    fn on_session_ended(
        &self,
        _request: &Request,
        _session: &mut Session,
        _context: &Context,
        _response: &mut Response,
    ) -> Result<(), HandlerError> {
        self.record(Lifecycle::SessionEnded);
        Ok(())
    }
}
