//! Response body assembled by lifecycle callbacks.
//!
//! A single [`Response`] is created per request and handed to each callback by
//! mutable reference. Callbacks populate it through the helper methods, which
//! only construct well-formed sub-objects and perform no other validation.

use serde::{Deserialize, Serialize};

use crate::directive::{
    AudioItem, AudioPlayerCommand, AudioPlayerDirective, DialogCommand, DialogDirective,
    Directive, Stream,
};
use crate::request::Intent;

const fn default_should_end_session() -> bool {
    true
}

/// Body of a response envelope.
///
/// `should_end_session` defaults to `true`; directives can only be appended,
/// so the order in which callbacks issue them is preserved.
///
/// # Example
///
/// ```
/// use skillgate_types::Response;
///
/// let mut response = Response::default();
/// response.set_output_speech("Hello");
/// response.set_simple_card("Greeting", "Hello");
/// response.set_end_session(false);
///
/// assert!(!response.should_end_session());
/// assert_eq!(response.card().map(|card| card.title.as_str()), Some("Greeting"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    card: Option<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    directives: Vec<Directive>,
    #[serde(default = "default_should_end_session")]
    should_end_session: bool,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            output_speech: None,
            card: None,
            reprompt: None,
            directives: Vec::new(),
            should_end_session: default_should_end_session(),
        }
    }
}

impl Response {
    /// Returns the spoken output, if set.
    #[must_use]
    pub const fn output_speech(&self) -> Option<&OutputSpeech> {
        self.output_speech.as_ref()
    }

    /// Returns the visual card, if set.
    #[must_use]
    pub const fn card(&self) -> Option<&Card> {
        self.card.as_ref()
    }

    /// Returns the reprompt, if set.
    #[must_use]
    pub const fn reprompt(&self) -> Option<&Reprompt> {
        self.reprompt.as_ref()
    }

    /// Returns the directives in the order they were added.
    #[must_use]
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Returns whether the platform should close the session.
    #[must_use]
    pub const fn should_end_session(&self) -> bool {
        self.should_end_session
    }

    /// Sets plain-text spoken output.
    pub fn set_output_speech(&mut self, text: impl Into<String>) {
        self.output_speech = Some(OutputSpeech::plain_text(text));
    }

    /// Sets SSML spoken output.
    pub fn set_output_ssml(&mut self, ssml: impl Into<String>) {
        self.output_speech = Some(OutputSpeech::ssml(ssml));
    }

    /// Replaces the spoken output with a prepared [`OutputSpeech`].
    pub fn set_speech(&mut self, speech: OutputSpeech) {
        self.output_speech = Some(speech);
    }

    /// Sets a card with a title and plain text content.
    pub fn set_simple_card(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.card = Some(Card {
            title: title.into(),
            content: content.into(),
            ..Card::new(CardType::Simple)
        });
    }

    /// Sets a card with a title, text and an image.
    pub fn set_standard_card(
        &mut self,
        title: impl Into<String>,
        text: impl Into<String>,
        small_image_url: impl Into<String>,
        large_image_url: impl Into<String>,
    ) {
        self.card = Some(Card {
            title: title.into(),
            text: text.into(),
            image: Some(Image {
                small_image_url: small_image_url.into(),
                large_image_url: large_image_url.into(),
            }),
            ..Card::new(CardType::Standard)
        });
    }

    /// Sets a card prompting the user to link their account.
    pub fn set_link_account_card(&mut self) {
        self.card = Some(Card::new(CardType::LinkAccount));
    }

    /// Sets a plain-text reprompt, creating the reprompt when absent.
    pub fn set_reprompt_text(&mut self, text: impl Into<String>) {
        self.reprompt
            .get_or_insert_with(Reprompt::default)
            .output_speech = Some(OutputSpeech::plain_text(text));
    }

    /// Sets an SSML reprompt, creating the reprompt when absent.
    pub fn set_reprompt_ssml(&mut self, ssml: impl Into<String>) {
        self.reprompt
            .get_or_insert_with(Reprompt::default)
            .output_speech = Some(OutputSpeech::ssml(ssml));
    }

    /// Sets whether the platform should close the session after this turn.
    pub const fn set_end_session(&mut self, flag: bool) -> &mut Self {
        self.should_end_session = flag;
        self
    }

    /// Appends an audio player directive.
    pub fn add_audio_player(
        &mut self,
        command: AudioPlayerCommand,
        play_behavior: Option<PlayBehavior>,
        stream_token: impl Into<String>,
        url: impl Into<String>,
        offset_in_milliseconds: u64,
    ) {
        self.add_directive(AudioPlayerDirective {
            command,
            play_behavior,
            audio_item: Some(AudioItem {
                stream: Stream {
                    token: stream_token.into(),
                    url: url.into(),
                    offset_in_milliseconds,
                },
            }),
        });
    }

    /// Appends a dialog directive.
    pub fn add_dialog_directive(
        &mut self,
        command: DialogCommand,
        slot_to_elicit: Option<&str>,
        slot_to_confirm: Option<&str>,
        updated_intent: Option<Intent>,
    ) {
        self.add_directive(DialogDirective {
            command,
            slot_to_elicit: slot_to_elicit.map(str::to_owned),
            slot_to_confirm: slot_to_confirm.map(str::to_owned),
            updated_intent,
        });
    }

    /// Appends any directive after those already present.
    pub fn add_directive(&mut self, directive: impl Into<Directive>) {
        self.directives.push(directive.into());
    }
}

/// What the device says to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSpeech {
    /// Whether `text` or `ssml` carries the speech.
    #[serde(rename = "type")]
    pub speech_type: SpeechType,
    /// Plain text speech.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// SSML speech.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ssml: String,
    /// How this speech interacts with speech already queued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_behavior: Option<PlayBehavior>,
}

impl OutputSpeech {
    /// Creates plain-text speech.
    #[must_use]
    pub fn plain_text(text: impl Into<String>) -> Self {
        Self {
            speech_type: SpeechType::PlainText,
            text: text.into(),
            ssml: String::new(),
            play_behavior: None,
        }
    }

    /// Creates SSML speech.
    #[must_use]
    pub fn ssml(ssml: impl Into<String>) -> Self {
        Self {
            speech_type: SpeechType::Ssml,
            text: String::new(),
            ssml: ssml.into(),
            play_behavior: None,
        }
    }

    /// Sets the play behaviour.
    #[must_use]
    pub const fn with_play_behavior(mut self, behavior: PlayBehavior) -> Self {
        self.play_behavior = Some(behavior);
        self
    }
}

/// Format of an [`OutputSpeech`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeechType {
    /// Unformatted text.
    PlainText,
    /// Speech Synthesis Markup Language.
    #[serde(rename = "SSML")]
    Ssml,
}

/// How new audio or speech interacts with what is already queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayBehavior {
    /// Add to the end of the queue without interrupting.
    Enqueue,
    /// Interrupt immediately and replace everything queued.
    ReplaceAll,
    /// Replace the queue without interrupting the current item.
    ReplaceEnqueued,
}

/// Visual card shown in the companion app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Card layout.
    #[serde(rename = "type")]
    pub card_type: CardType,
    /// Card title.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Body of a simple card.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    /// Body of a standard card.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Image of a standard card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
}

impl Card {
    /// Creates an empty card of the given type.
    #[must_use]
    pub const fn new(card_type: CardType) -> Self {
        Self {
            card_type,
            title: String::new(),
            content: String::new(),
            text: String::new(),
            image: None,
        }
    }
}

/// Card layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    /// Title and plain text content.
    Simple,
    /// Title, text and an image.
    Standard,
    /// Link to the account-linking authorisation page.
    LinkAccount,
    /// Request for consent to read customer information.
    AskForPermissionsConsent,
}

/// Image URLs for a standard card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Image for small screens.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub small_image_url: String,
    /// Image for large screens.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub large_image_url: String,
}

/// Speech used when the user does not answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    /// Reprompt speech.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
}
