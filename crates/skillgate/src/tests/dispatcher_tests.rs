//! Tests for validation order, routing and response assembly.

use mockall::Sequence;
use rstest::rstest;
use time::Duration;

use super::{
    APP_ID, FixedClock, NOW, RecordingHandler, dispatcher, envelope, settings,
};
use crate::types::{AttributeValue, RequestEnvelope};
use crate::{
    DispatchError, DispatchSettings, Dispatcher, EnvelopePart, IdentityMismatch, Lifecycle,
    MockSkillHandler, Route,
};

#[rstest]
fn new_session_starts_before_launch(settings: DispatchSettings) {
    let mut handler = MockSkillHandler::new();
    let mut sequence = Sequence::new();
    handler
        .expect_on_session_started()
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_, _, _, _| Ok(()));
    handler
        .expect_on_launch()
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_, _, _, response| {
            response.set_end_session(false);
            Ok(())
        });

    let mut request = envelope(true, "LaunchRequest");
    let dispatch = dispatcher(settings, handler)
        .process(&mut request)
        .expect("dispatch succeeds");

    assert_eq!(dispatch.route, Route::Launch);
    assert!(!dispatch.response.response.should_end_session());
}

#[rstest]
fn untouched_launch_keeps_default_end_session(settings: DispatchSettings) {
    let mut handler = MockSkillHandler::new();
    handler
        .expect_on_session_started()
        .times(1)
        .returning(|_, _, _, _| Ok(()));
    handler
        .expect_on_launch()
        .times(1)
        .returning(|_, _, _, _| Ok(()));

    let mut request = envelope(true, "LaunchRequest");
    let response = dispatcher(settings, handler)
        .process(&mut request)
        .expect("dispatch succeeds")
        .into_response();

    assert!(response.response.should_end_session());
    assert_eq!(response.version, "1.0");
}

#[rstest]
fn existing_session_skips_session_start(settings: DispatchSettings) {
    let mut handler = MockSkillHandler::new();
    handler.expect_on_session_started().never();
    handler
        .expect_on_intent()
        .times(1)
        .returning(|_, _, _, _| Ok(()));

    let mut request = envelope(false, "IntentRequest");
    let dispatch = dispatcher(settings, handler)
        .process(&mut request)
        .expect("dispatch succeeds");
    assert_eq!(dispatch.route, Route::Intent);
}

#[rstest]
#[case::launch("LaunchRequest", Route::Launch, Lifecycle::Launch)]
#[case::intent("IntentRequest", Route::Intent, Lifecycle::Intent)]
#[case::session_ended("SessionEndedRequest", Route::SessionEnded, Lifecycle::SessionEnded)]
fn routes_by_request_type(
    settings: DispatchSettings,
    #[case] request_type: &str,
    #[case] expected_route: Route,
    #[case] expected_callback: Lifecycle,
) {
    let handler = RecordingHandler::default();
    let dispatcher = dispatcher(settings, handler);
    let mut request = envelope(false, request_type);

    let dispatch = dispatcher.process(&mut request).expect("dispatch succeeds");

    assert_eq!(dispatch.route, expected_route);
    assert_eq!(dispatcher.handler().calls(), vec![expected_callback]);
}

#[rstest]
#[case::playback_event("AudioPlayer.PlaybackStarted")]
#[case::lowercase("launchrequest")]
#[case::empty("")]
fn unknown_request_type_returns_default_response(
    settings: DispatchSettings,
    #[case] request_type: &str,
) {
    let handler = MockSkillHandler::new();
    let mut request = envelope(false, request_type);

    let dispatch = dispatcher(settings, handler)
        .process(&mut request)
        .expect("unknown types are not errors");

    assert_eq!(
        dispatch.route,
        Route::Unhandled {
            request_type: String::from(request_type)
        }
    );
    assert_eq!(dispatch.route.callback(), None);
    let response = &dispatch.response.response;
    assert!(response.output_speech().is_none());
    assert!(response.card().is_none());
    assert!(response.should_end_session());
}

#[rstest]
fn unknown_type_on_new_session_still_starts_session(settings: DispatchSettings) {
    let handler = RecordingHandler::default();
    let dispatcher = dispatcher(settings, handler);
    let mut request = envelope(true, "Display.ElementSelected");

    dispatcher.process(&mut request).expect("dispatch succeeds");

    assert_eq!(dispatcher.handler().calls(), vec![Lifecycle::SessionStarted]);
}

#[rstest]
fn session_start_failure_aborts_request(settings: DispatchSettings) {
    let mut handler = MockSkillHandler::new();
    handler
        .expect_on_session_started()
        .times(1)
        .returning(|_, _, _, _| Err("storage offline".into()));
    handler.expect_on_launch().never();

    let mut request = envelope(true, "LaunchRequest");
    let error = dispatcher(settings, handler)
        .process(&mut request)
        .expect_err("session start failure propagates");

    match error {
        DispatchError::Handler { callback, source } => {
            assert_eq!(callback, Lifecycle::SessionStarted);
            assert_eq!(source.to_string(), "storage offline");
        }
        other => panic!("expected handler error, got {other:?}"),
    }
}

#[rstest]
fn type_callback_failure_is_propagated(settings: DispatchSettings) {
    let handler = RecordingHandler {
        failing: Some(Lifecycle::Intent),
        ..RecordingHandler::default()
    };
    let dispatcher = dispatcher(settings, handler);
    let mut request = envelope(false, "IntentRequest");

    let error = dispatcher.process(&mut request).expect_err("intent failure");

    assert!(matches!(
        error,
        DispatchError::Handler {
            callback: Lifecycle::Intent,
            ..
        }
    ));
    assert!(!error.is_validation_failure());
    assert_eq!(error.to_string(), "on_intent handler failed");
}

#[rstest]
#[case::configured_empty("", APP_ID, IdentityMismatch::ConfiguredIdEmpty)]
#[case::request_empty(APP_ID, "", IdentityMismatch::RequestIdEmpty)]
#[case::mismatch(
    APP_ID,
    "amzn1.ask.skill.other",
    IdentityMismatch::Mismatch {
        expected: String::from(APP_ID),
        actual: String::from("amzn1.ask.skill.other"),
    }
)]
fn identity_failures_return_no_response(
    #[case] configured: &str,
    #[case] requested: &str,
    #[case] expected: IdentityMismatch,
) {
    let handler = MockSkillHandler::new();
    let mut request = envelope(true, "LaunchRequest");
    if let Some(session) = request.session.as_mut() {
        session.application.application_id = String::from(requested);
    }

    let error = dispatcher(DispatchSettings::new(configured), handler)
        .process(&mut request)
        .expect_err("identity check fails");

    assert!(matches!(&error, DispatchError::ApplicationIdentity(mismatch) if *mismatch == expected));
    assert!(error.is_validation_failure());
}

#[test]
fn disabled_identity_check_accepts_any_application() {
    let settings = DispatchSettings::new("").without_identity_check();
    let mut request = envelope(false, "LaunchRequest");
    if let Some(session) = request.session.as_mut() {
        session.application.application_id = String::from("amzn1.ask.skill.other");
    }

    let result = dispatcher(settings, RecordingHandler::default()).process(&mut request);
    assert!(result.is_ok());
}

#[rstest]
#[case::past(-150, true)]
#[case::future(150, true)]
#[case::beyond_past(-151, false)]
#[case::beyond_future(151, false)]
fn tolerance_boundary_is_inclusive(
    settings: DispatchSettings,
    #[case] clock_offset_secs: i64,
    #[case] accepted: bool,
) {
    let dispatcher = Dispatcher::new(settings, RecordingHandler::default())
        .with_clock(FixedClock(NOW + Duration::seconds(clock_offset_secs)));
    let mut request = envelope(false, "LaunchRequest");

    let result = dispatcher.process(&mut request);

    assert_eq!(result.is_ok(), accepted, "unexpected outcome: {result:?}");
    if !accepted {
        assert!(dispatcher.handler().calls().is_empty());
    }
}

#[rstest]
fn custom_tolerance_is_honoured(settings: DispatchSettings) {
    let dispatcher = Dispatcher::new(
        settings.with_timestamp_tolerance(10),
        RecordingHandler::default(),
    )
    .with_clock(FixedClock(NOW + Duration::seconds(11)));
    let mut request = envelope(false, "LaunchRequest");

    let error = dispatcher.process(&mut request).expect_err("stale request");
    assert!(matches!(
        error,
        DispatchError::TimestampOutOfTolerance {
            skew_secs: 11,
            tolerance_secs: 10,
        }
    ));
}

#[rstest]
fn malformed_timestamp_is_a_parse_error(settings: DispatchSettings) {
    let mut request = envelope(false, "LaunchRequest");
    if let Some(body) = request.request.as_mut() {
        body.timestamp = String::from("19/10/2026 10:00");
    }

    let error = dispatcher(settings, MockSkillHandler::new())
        .process(&mut request)
        .expect_err("malformed timestamp");
    assert!(matches!(error, DispatchError::TimestampParse { .. }));
}

#[rstest]
fn disabled_timestamp_check_accepts_stale_and_malformed(settings: DispatchSettings) {
    let dispatcher = dispatcher(settings.without_timestamp_check(), RecordingHandler::default());
    let mut stale = envelope(false, "LaunchRequest");
    if let Some(body) = stale.request.as_mut() {
        body.timestamp = String::from("2001-01-01T00:00:00Z");
    }
    let mut malformed = envelope(false, "LaunchRequest");
    if let Some(body) = malformed.request.as_mut() {
        body.timestamp = String::from("not a time");
    }

    assert!(dispatcher.process(&mut stale).is_ok());
    assert!(dispatcher.process(&mut malformed).is_ok());
}

#[rstest]
fn identity_is_checked_before_timestamp(settings: DispatchSettings) {
    let mut request = envelope(false, "LaunchRequest");
    if let Some(session) = request.session.as_mut() {
        session.application.application_id = String::from("amzn1.ask.skill.other");
    }
    if let Some(body) = request.request.as_mut() {
        body.timestamp = String::from("garbage");
    }

    let error = dispatcher(settings, MockSkillHandler::new())
        .process(&mut request)
        .expect_err("rejected");
    assert!(matches!(error, DispatchError::ApplicationIdentity(_)));
}

#[rstest]
#[case::session(EnvelopePart::Session)]
#[case::request(EnvelopePart::Request)]
fn missing_parts_are_rejected(settings: DispatchSettings, #[case] part: EnvelopePart) {
    let mut request = envelope(true, "LaunchRequest");
    match part {
        EnvelopePart::Session => request.session = None,
        EnvelopePart::Request => request.request = None,
        EnvelopePart::Envelope => {}
    }

    let error = dispatcher(settings, MockSkillHandler::new())
        .process(&mut request)
        .expect_err("missing part");
    assert!(matches!(error, DispatchError::MissingEnvelope { part: missing } if missing == part));
}

#[rstest]
fn absent_attributes_are_initialised_in_place(settings: DispatchSettings) {
    let mut request = envelope(false, "LaunchRequest");
    let dispatch = dispatcher(settings, RecordingHandler::default())
        .process(&mut request)
        .expect("dispatch succeeds");

    let session = request.session.as_ref().expect("session present");
    assert_eq!(session.attributes.as_ref().map(|map| map.len()), Some(0));
    assert!(dispatch.response.session_attributes.is_empty());
}

#[rstest]
fn attributes_are_copied_not_aliased(settings: DispatchSettings) {
    let mut request = envelope(true, "LaunchRequest");
    if let Some(session) = request.session.as_mut() {
        session.set_attribute("genre", "jazz");
    }

    let dispatch = dispatcher(settings, RecordingHandler::default())
        .process(&mut request)
        .expect("dispatch succeeds");

    let session = request.session.as_mut().expect("session present");
    session.set_attribute("genre", "blues");
    session.remove_attribute("started");

    let copied = &dispatch.response.session_attributes;
    assert_eq!(copied.get("genre").and_then(AttributeValue::as_str), Some("jazz"));
    assert_eq!(copied.get("started").and_then(AttributeValue::as_bool), Some(true));
}

#[rstest]
fn initialisation_survives_a_failed_callback(settings: DispatchSettings) {
    let handler = RecordingHandler {
        failing: Some(Lifecycle::Launch),
        ..RecordingHandler::default()
    };
    let mut request = envelope(false, "LaunchRequest");

    let result = dispatcher(settings, handler).process(&mut request);

    assert!(result.is_err());
    let session = request.session.as_ref().expect("session present");
    assert!(session.attributes.is_some());
}

#[test]
fn rejected_envelope_leaves_attributes_absent() {
    let mut request: RequestEnvelope = envelope(false, "LaunchRequest");
    let result = dispatcher(DispatchSettings::new(""), MockSkillHandler::new()).process(&mut request);

    assert!(result.is_err());
    let session = request.session.as_ref().expect("session present");
    assert!(session.attributes.is_none());
}
