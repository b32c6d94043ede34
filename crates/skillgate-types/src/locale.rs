//! Locales understood by the platform.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A locale code the platform sends in `request.locale`.
///
/// Requests carry the locale as free text; [`Locale`] covers the codes the
/// platform documents and parses with `str::parse`.
///
/// # Example
///
/// ```
/// use skillgate_types::Locale;
///
/// let locale: Locale = "en-GB".parse().unwrap();
/// assert_eq!(locale, Locale::BritishEnglish);
/// assert!(locale.is_english());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum Locale {
    /// Italian.
    #[serde(rename = "it-IT")]
    #[strum(serialize = "it-IT")]
    Italian,
    /// Standard German.
    #[serde(rename = "de-DE")]
    #[strum(serialize = "de-DE")]
    German,
    /// Australian English.
    #[serde(rename = "en-AU")]
    #[strum(serialize = "en-AU")]
    AustralianEnglish,
    /// Canadian English.
    #[serde(rename = "en-CA")]
    #[strum(serialize = "en-CA")]
    CanadianEnglish,
    /// UK English.
    #[serde(rename = "en-GB")]
    #[strum(serialize = "en-GB")]
    BritishEnglish,
    /// Indian English.
    #[serde(rename = "en-IN")]
    #[strum(serialize = "en-IN")]
    IndianEnglish,
    /// US English.
    #[serde(rename = "en-US")]
    #[strum(serialize = "en-US")]
    AmericanEnglish,
    /// Japanese.
    #[serde(rename = "ja-JP")]
    #[strum(serialize = "ja-JP")]
    Japanese,
}

impl Locale {
    /// Returns the wire code, for example `en-US`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Returns `true` for the English-family locales.
    #[must_use]
    pub fn is_english(self) -> bool {
        is_english(self.as_str())
    }
}

/// Reports whether a locale code belongs to the English family.
///
/// Matches on the `en-` prefix so regional codes the platform adds later are
/// recognised without a release.
#[must_use]
pub fn is_english(locale: &str) -> bool {
    locale.starts_with("en-")
}
