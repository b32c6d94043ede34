//! Unit tests for `skillgate_types`.

use rstest::fixture;


/// A complete intent request as the platform sends it.
pub(crate) const INTENT_ENVELOPE: &str = r#"{
    "version": "1.0",
    "session": {
        "new": false,
        "sessionId": "amzn1.echo-api.session.1",
        "application": {"applicationId": "amzn1.ask.skill.demo"},
        "attributes": {"count": 2, "genre": "jazz"},
        "user": {"userId": "amzn1.ask.account.user", "accessToken": "token-1"}
    },
    "request": {
        "locale": "en-GB",
        "timestamp": "2026-10-19T10:00:00Z",
        "type": "IntentRequest",
        "requestId": "amzn1.echo-api.request.1",
        "dialogState": "IN_PROGRESS",
        "intent": {
            "name": "PlayMusicIntent",
            "confirmationStatus": "NONE",
            "slots": {
                "genre": {
                    "name": "genre",
                    "confirmationStatus": "CONFIRMED",
                    "value": "smooth jazz",
                    "resolutions": {
                        "resolutionsPerAuthority": [{
                            "authority": "amzn1.er-authority.echo-sdk.genre",
                            "status": {"code": "ER_SUCCESS_MATCH"},
                            "values": [{"value": {"name": "jazz", "id": "JAZZ"}}]
                        }]
                    }
                },
                "artist": {"name": "artist"}
            }
        }
    },
    "context": {
        "AudioPlayer": {"token": "track-7", "offsetInMilliseconds": 1200, "playerActivity": "PAUSED"},
        "Display": {"token": "screen-1"},
        "System": {
            "application": {"applicationId": "amzn1.ask.skill.demo"},
            "user": {"userId": "amzn1.ask.account.user"},
            "device": {
                "deviceId": "device-1",
                "supportedInterfaces": {
                    "AudioPlayer": {},
                    "Display": {"templateVersion": "1.0", "markupVersion": "1.0"}
                }
            },
            "apiEndpoint": "https://api.example.com",
            "apiAccessToken": "api-token"
        }
    }
}"#;

#[fixture]
pub(crate) fn intent_envelope() -> crate::RequestEnvelope {
    serde_json::from_str(INTENT_ENVELOPE).expect("sample envelope parses")
}
