//! JSON report printed after a request is dispatched.

use std::collections::BTreeMap;

use serde::Serialize;
use skillgate::{Dispatch, Lifecycle, Route};
use skillgate_types::{RequestEnvelope, ResponseEnvelope, is_english};

/// Summary of one dispatched request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionReport {
    /// Session identifier.
    pub session_id: String,
    /// User identifier.
    pub user_id: String,
    /// Whether the platform flagged the session as new.
    pub new_session: bool,
    /// Request type as received.
    pub request_type: String,
    /// Intent name, or the request type for non-intent requests.
    pub intent_name: String,
    /// Request locale.
    pub locale: String,
    /// Whether the locale is in the English family.
    pub english: bool,
    /// Slot values by slot name.
    pub slots: BTreeMap<String, String>,
    /// Callbacks invoked, in order.
    pub callbacks: Vec<&'static str>,
    /// Whether the request type was left unhandled.
    pub unhandled: bool,
    /// Response envelope returned by the dispatcher.
    pub response: ResponseEnvelope,
}

impl InspectionReport {
    /// Builds a report from a processed envelope and its dispatch outcome.
    #[must_use]
    pub fn new(envelope: &RequestEnvelope, dispatch: Dispatch, callbacks: &[Lifecycle]) -> Self {
        let locale = envelope.locale().unwrap_or_default().to_owned();
        let slots = envelope
            .all_slots()
            .map(|all| {
                all.iter()
                    .map(|(name, slot)| (name.clone(), slot.value.clone()))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            session_id: envelope.session_id().unwrap_or_default().to_owned(),
            user_id: envelope.user_id().unwrap_or_default().to_owned(),
            new_session: envelope.session.as_ref().is_some_and(|session| session.new),
            request_type: envelope.request_type().unwrap_or_default().to_owned(),
            intent_name: envelope.intent_name().unwrap_or_default().to_owned(),
            english: is_english(&locale),
            locale,
            slots,
            callbacks: callbacks.iter().map(|callback| callback.as_str()).collect(),
            unhandled: matches!(dispatch.route, Route::Unhandled { .. }),
            response: dispatch.into_response(),
        }
    }
}
