//! Unit tests for the inspector.

use std::ffi::OsString;
use std::process::ExitCode;

use rstest::{fixture, rstest};
use serde_json::{Value, json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use skillgate::{DispatchError, Lifecycle};
use skillgate_config::Config;

use crate::{InspectError, InspectHandler, TURN_ATTRIBUTE, inspect, run};

const APP_ID: &str = "amzn1.ask.skill.inspect";

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .expect("format current time")
}

fn intent_body(new: bool, locale: &str) -> String {
    json!({
        "version": "1.0",
        "session": {
            "new": new,
            "sessionId": "amzn1.echo-api.session.9",
            "application": {"applicationId": APP_ID},
            "user": {"userId": "amzn1.ask.account.9"}
        },
        "request": {
            "type": "IntentRequest",
            "requestId": "amzn1.echo-api.request.9",
            "timestamp": now_rfc3339(),
            "locale": locale,
            "intent": {
                "name": "PlayMusicIntent",
                "slots": {
                    "genre": {"name": "genre", "value": "jazz"},
                    "artist": {"name": "artist"}
                }
            }
        }
    })
    .to_string()
}

#[fixture]
fn config() -> Config {
    Config {
        application_id: String::from(APP_ID),
        ..Config::default()
    }
}

#[rstest]
fn reports_intent_dispatch(config: Config) {
    let report = inspect(&config, intent_body(true, "en-AU").as_bytes()).expect("inspect");

    assert_eq!(report.session_id, "amzn1.echo-api.session.9");
    assert_eq!(report.user_id, "amzn1.ask.account.9");
    assert!(report.new_session);
    assert_eq!(report.intent_name, "PlayMusicIntent");
    assert!(report.english);
    assert_eq!(report.callbacks, vec!["on_session_started", "on_intent"]);
    assert!(!report.unhandled);
    assert_eq!(report.slots.get("genre").map(String::as_str), Some("jazz"));
    assert_eq!(report.slots.get("artist").map(String::as_str), Some(""));

    let card = report.response.response.card().expect("card set");
    assert_eq!(card.title, "PlayMusicIntent");
    assert_eq!(card.content, "artist=, genre=jazz");
    assert_eq!(
        report
            .response
            .session_attributes
            .get(TURN_ATTRIBUTE)
            .and_then(|value| value.as_u64()),
        Some(1)
    );
}

#[rstest]
fn report_serialises_in_camel_case(config: Config) {
    let report = inspect(&config, intent_body(false, "ja-JP").as_bytes()).expect("inspect");
    let value = serde_json::to_value(&report).expect("serialise");

    assert_eq!(value["requestType"], "IntentRequest");
    assert_eq!(value["english"], false);
    assert_eq!(value["callbacks"], json!(["on_intent"]));
    assert_eq!(value["response"]["version"], "1.0");
}

#[rstest]
fn rejects_foreign_application(mut config: Config) {
    config.application_id = String::from("amzn1.ask.skill.other");
    let error = inspect(&config, intent_body(false, "en-US").as_bytes()).expect_err("rejected");
    assert!(matches!(
        error,
        InspectError::Dispatch(DispatchError::ApplicationIdentity(_))
    ));
}

#[test]
fn skipped_checks_accept_stale_foreign_requests() {
    let config = Config {
        skip_application_id_check: true,
        skip_timestamp_check: true,
        ..Config::default()
    };
    let mut body: Value = serde_json::from_str(&intent_body(false, "en-US")).expect("body");
    body["session"]["application"]["applicationId"] = json!("amzn1.ask.skill.other");
    body["request"]["timestamp"] = json!("1999-01-01T00:00:00Z");

    let report = inspect(&config, body.to_string().as_bytes()).expect("inspect");
    assert_eq!(report.callbacks, vec!["on_intent"]);
}

#[test]
fn handler_records_calls_in_order() {
    let handler = InspectHandler::new();
    assert!(handler.invoked().is_empty());
    let dispatcher = skillgate::Dispatcher::new(
        skillgate::DispatchSettings::new("").without_identity_check().without_timestamp_check(),
        handler,
    );
    let mut envelope = skillgate::parse_envelope(
        br#"{"session": {"new": true}, "request": {"type": "LaunchRequest"}}"#,
    )
    .expect("parse");

    let dispatch = dispatcher.process(&mut envelope).expect("dispatch");

    assert_eq!(
        dispatcher.handler().invoked(),
        vec![Lifecycle::SessionStarted, Lifecycle::Launch]
    );
    assert!(!dispatch.response.response.should_end_session());
    assert!(dispatch.response.response.reprompt().is_some());
}

#[test]
fn run_prints_report_to_stdout() {
    let args = vec![
        OsString::from("skillgate-inspect"),
        OsString::from("--application-id"),
        OsString::from(APP_ID),
    ];
    let body = intent_body(false, "en-GB");
    let mut stdin = body.as_bytes();
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();

    let exit = run(args, &mut stdin, &mut stdout, &mut stderr);

    assert_eq!(exit, ExitCode::SUCCESS);
    assert!(stderr.is_empty());
    let report: Value = serde_json::from_slice(&stdout).expect("report is JSON");
    assert_eq!(report["intentName"], "PlayMusicIntent");
}

#[test]
fn run_reports_errors_on_stderr() {
    let args = vec![
        OsString::from("skillgate-inspect"),
        OsString::from("--application-id"),
        OsString::from(APP_ID),
    ];
    let mut stdin: &[u8] = b"{not json";
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();

    let exit = run(args, &mut stdin, &mut stdout, &mut stderr);

    assert_eq!(exit, ExitCode::FAILURE);
    assert!(stdout.is_empty());
    let message = String::from_utf8(stderr).expect("stderr utf8");
    assert!(message.starts_with("error: dispatch failed: malformed envelope"), "{message}");
}

#[test]
fn run_rejects_invalid_log_filter() {
    let args = vec![
        OsString::from("skillgate-inspect"),
        OsString::from("--application-id"),
        OsString::from(APP_ID),
        OsString::from("--log-filter"),
        OsString::from("skillgate=loud"),
    ];
    let body = intent_body(false, "en-GB");
    let mut stdin = body.as_bytes();
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();

    let exit = run(args, &mut stdin, &mut stdout, &mut stderr);

    assert_eq!(exit, ExitCode::FAILURE);
    assert!(stdout.is_empty());
    let message = String::from_utf8(stderr).expect("stderr utf8");
    assert!(message.starts_with("error: invalid log filter 'skillgate=loud'"), "{message}");
}
