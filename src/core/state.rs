//! # Session State
//!
//! Everything the screens need to know about the current translation job.
//! No TUI types here; presentation state lives in the `tui` module.
//!
//! ```text
//! Session
//! ├── view: ViewId                      // screen currently shown
//! ├── source_language: Option<Language> // None = auto-detect
//! ├── target_language: Option<Language>
//! ├── formality: Formality
//! ├── source_text: String               // mirrored from the source text area
//! ├── translation: Option<Translation>  // last result
//! ├── languages: SharedLanguages        // lazily fetched language lists
//! ├── has_api_key: bool
//! ├── insert_mode: bool                 // a text widget is capturing keys
//! ├── is_loading: bool                  // waiting for the service
//! ├── error: Option<String>
//! └── content_width/height: u16         // space available to a view
//! ```
//!
//! Widgets only ever see `&Session`. Every change goes through
//! `update(session, action)` in action.rs.

use std::sync::Arc;

use crate::core::config::ResolvedConfig;
use crate::deepl::{Formality, Language, LanguageCache, SharedLanguages, Translation};

/// The screens of the application. Each one owns its own layout grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Main,
    SourceLanguage,
    TargetLanguage,
    Formality,
    Login,
    Error,
}

impl ViewId {
    pub const ALL: [ViewId; 6] = [
        ViewId::Main,
        ViewId::SourceLanguage,
        ViewId::TargetLanguage,
        ViewId::Formality,
        ViewId::Login,
        ViewId::Error,
    ];
}

pub struct Session {
    pub view: ViewId,
    pub source_language: Option<Language>,
    pub target_language: Option<Language>,
    pub formality: Formality,
    pub source_text: String,
    pub translation: Option<Translation>,
    pub languages: SharedLanguages,
    pub has_api_key: bool,
    pub insert_mode: bool,
    pub is_loading: bool,
    /// A language fetch is in flight
    pub languages_pending: bool,
    pub error: Option<String>,
    pub status_message: String,
    pub show_full_help: bool,
    pub content_width: u16,
    pub content_height: u16,
}

impl Session {
    pub fn new(has_api_key: bool) -> Self {
        Self {
            view: if has_api_key { ViewId::Main } else { ViewId::Login },
            source_language: None,
            target_language: None,
            formality: Formality::default(),
            source_text: String::new(),
            translation: None,
            languages: Arc::new(LanguageCache::new()),
            has_api_key,
            insert_mode: false,
            is_loading: false,
            languages_pending: false,
            error: None,
            status_message: String::new(),
            show_full_help: false,
            content_width: 0,
            content_height: 0,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut session = Self::new(config.api_key.is_some());
        session.source_language = config.source_language.as_deref().map(Language::from_code);
        session.target_language = config.target_language.as_deref().map(Language::from_code);
        session.formality = config.formality;
        session
    }

    /// Label for the source language button; `auto` when detection is left to the service.
    pub fn source_label(&self) -> &str {
        self.source_language
            .as_ref()
            .map(|l| l.name.as_str())
            .unwrap_or("auto")
    }

    /// Label for the target language button.
    pub fn target_label(&self) -> &str {
        self.target_language
            .as_ref()
            .map(|l| l.name.as_str())
            .unwrap_or("none")
    }

    /// A language is known only by the code it was configured with, because
    /// the language lists have not been fetched yet.
    pub fn has_unresolved_languages(&self) -> bool {
        !self.languages.is_loaded()
            && (self.source_language.is_some() || self.target_language.is_some())
    }

    /// Whether the chosen target language accepts a formality setting.
    pub fn formality_applies(&self) -> bool {
        self.target_language
            .as_ref()
            .is_some_and(|l| l.supports_formality)
    }
}
