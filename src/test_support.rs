//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use ratatui::text::Text;

use crate::core::action::Action;
use crate::core::state::Session;
use crate::deepl::{
    ApiError, Language, Languages, TranslateParams, TranslateResponse, Translation,
    TranslationProvider,
};
use crate::tui::layout::{Msg, Widget};

/// Shared record of the hooks probes have seen, in call order.
pub type EventLog = Rc<RefCell<Vec<String>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// A widget that renders its name and records every hook it receives.
///
/// Entries look like `init:a`, `update:a`, `width:a:12`, `set_active:a`.
pub struct Probe {
    name: String,
    log: EventLog,
    active: bool,
    on_init: Option<Action>,
    on_update: Option<Action>,
}

impl Probe {
    pub fn new(name: &str, log: &EventLog) -> Self {
        Self {
            name: name.to_string(),
            log: Rc::clone(log),
            active: false,
            on_init: None,
            on_update: None,
        }
    }

    /// Return `action` from every `update`.
    pub fn emitting(mut self, action: Action) -> Self {
        self.on_update = Some(action);
        self
    }

    /// Return `action` from `init`.
    pub fn init_with(mut self, action: Action) -> Self {
        self.on_init = Some(action);
        self
    }

    fn record(&self, hook: &str) {
        self.log.borrow_mut().push(format!("{}:{}", hook, self.name));
    }
}

impl Widget for Probe {
    fn init(&mut self, _session: &Session) -> Option<Action> {
        self.record("init");
        self.on_init.clone()
    }

    fn update(&mut self, _msg: &Msg, _session: &Session) -> Option<Action> {
        self.record("update");
        self.on_update.clone()
    }

    fn render(&self, _session: &Session) -> Text<'static> {
        Text::raw(self.name.clone())
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self) {
        self.record("set_active");
        self.active = true;
    }

    fn unset_active(&mut self) {
        self.record("unset_active");
        self.active = false;
    }

    fn on_available_width_change(&mut self, width: u16) {
        self.log
            .borrow_mut()
            .push(format!("width:{}:{}", self.name, width));
    }
}

/// A session with an API key, on the main screen.
pub fn test_session() -> Session {
    Session::new(true)
}

pub fn german() -> Language {
    Language {
        language: "DE".to_string(),
        name: "German".to_string(),
        supports_formality: true,
    }
}

pub fn english() -> Language {
    Language {
        language: "EN-GB".to_string(),
        name: "English (British)".to_string(),
        supports_formality: false,
    }
}

/// Text content without styles, lines joined by `\n`.
pub fn plain(text: &Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A translation service that answers instantly from fixed data.
///
/// Translations come back as `[TARGET] text`, detected as `EN`.
pub struct StaticProvider {
    pub languages: Languages,
}

impl Default for StaticProvider {
    fn default() -> Self {
        Self {
            languages: Languages {
                source: vec![german(), english()],
                target: vec![german(), english()],
            },
        }
    }
}

#[async_trait]
impl TranslationProvider for StaticProvider {
    async fn translate(&self, params: &TranslateParams) -> Result<TranslateResponse, ApiError> {
        Ok(TranslateResponse {
            translations: vec![Translation {
                detected_source_language: Some("EN".to_string()),
                text: format!("[{}] {}", params.target_lang, params.text.join("\n")),
            }],
        })
    }

    async fn languages(&self) -> Result<Languages, ApiError> {
        Ok(self.languages.clone())
    }
}
