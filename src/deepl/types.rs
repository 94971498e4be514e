use serde::{Deserialize, Serialize};

/// A language supported by the translation service.
///
/// The service lists source and target languages separately, and only
/// target languages report whether a formality can be requested.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Language {
    /// Language code, e.g. "DE" or "EN-GB"
    pub language: String,
    /// Friendly name, e.g. "German"
    pub name: String,
    #[serde(default)]
    pub supports_formality: bool,
}

impl Language {
    /// A placeholder for a language known only by its code (from config or CLI).
    /// Resolved against the fetched list once it arrives.
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_uppercase();
        Self {
            name: code.clone(),
            language: code,
            supports_formality: false,
        }
    }
}

/// Both language lists, as returned by the languages endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Languages {
    pub source: Vec<Language>,
    pub target: Vec<Language>,
}

/// How formal the translated text should sound.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Formality {
    Less,
    PreferLess,
    #[default]
    Default,
    PreferMore,
    More,
}

impl Formality {
    /// All variants, least formal first. This is the order of the formality picker.
    pub const ALL: [Formality; 5] = [
        Formality::Less,
        Formality::PreferLess,
        Formality::Default,
        Formality::PreferMore,
        Formality::More,
    ];

    /// The wire value, also shown on the formality button.
    pub fn label(&self) -> &'static str {
        match self {
            Formality::Less => "less",
            Formality::PreferLess => "prefer_less",
            Formality::Default => "default",
            Formality::PreferMore => "prefer_more",
            Formality::More => "more",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(label.trim()))
    }
}

/// Request body for the translate endpoint.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TranslateParams {
    pub text: Vec<String>,
    /// Omitted to let the service detect the source language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_lang: Option<String>,
    pub target_lang: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formality: Option<Formality>,
}

/// A single translated text.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    #[serde(default)]
    pub detected_source_language: Option<String>,
    pub text: String,
}

/// Response body of the translate endpoint.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TranslateResponse {
    pub translations: Vec<Translation>,
}
