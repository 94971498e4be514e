//! # Button
//!
//! `label: value` with the value drawn as a pill. Enter returns the button's
//! action. The value is read from the session on every render, so a button
//! never holds a stale copy of the language it shows.

use ratatui::text::{Line, Span, Text};

use crate::core::action::Action;
use crate::core::state::Session;
use crate::tui::event::TuiEvent;
use crate::tui::layout::{Msg, Widget};
use crate::tui::styles;

pub struct Button {
    label: Option<&'static str>,
    value: fn(&Session) -> String,
    on_press: Action,
    active: bool,
}

impl Button {
    pub fn new(label: &'static str, value: fn(&Session) -> String, on_press: Action) -> Self {
        Self {
            label: Some(label),
            value,
            on_press,
            active: false,
        }
    }

    /// A button with fixed text and no label.
    pub fn plain(value: fn(&Session) -> String, on_press: Action) -> Self {
        Self {
            label: None,
            value,
            on_press,
            active: false,
        }
    }

    pub fn source_language() -> Self {
        Self::new(
            "Source",
            |s| s.source_label().to_string(),
            Action::SourceLanguageButtonPressed,
        )
    }

    pub fn target_language() -> Self {
        Self::new(
            "Target",
            |s| s.target_label().to_string(),
            Action::TargetLanguageButtonPressed,
        )
    }

    pub fn formality() -> Self {
        Self::new(
            "Formality",
            |s| s.formality.label().to_string(),
            Action::FormalityButtonPressed,
        )
    }

    pub fn translate() -> Self {
        Self::plain(
            |s| {
                if s.is_loading {
                    "Translating...".to_string()
                } else {
                    "Translate".to_string()
                }
            },
            Action::TranslateButtonPressed,
        )
    }
}

impl Widget for Button {
    fn update(&mut self, msg: &Msg, _session: &Session) -> Option<Action> {
        match msg {
            Msg::Input(TuiEvent::Enter) => Some(self.on_press.clone()),
            _ => None,
        }
    }

    fn render(&self, session: &Session) -> Text<'static> {
        let value = (self.value)(session);
        let pill = if self.active {
            Span::styled(format!(">{value}<"), styles::button_active())
        } else {
            Span::styled(format!(" {value} "), styles::button())
        };

        let mut spans = Vec::with_capacity(2);
        if let Some(label) = self.label {
            spans.push(Span::raw(format!("{label}: ")));
        }
        spans.push(pill);
        Text::from(Line::from(spans))
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self) {
        self.active = true;
    }

    fn unset_active(&mut self) {
        self.active = false;
    }
}
