//! Masked API key input for the login screen.
//!
//! The screen opens in insert mode so the key can be pasted right away.
//! Enter submits, Esc stops editing (Enter resumes).

use ratatui::text::{Line, Span, Text};

use crate::core::action::Action;
use crate::core::state::Session;
use crate::tui::event::TuiEvent;
use crate::tui::layout::{Msg, Widget};
use crate::tui::styles;

const MASK: char = '•';

#[derive(Default)]
pub struct KeyInput {
    buffer: String,
    editing: bool,
    active: bool,
    width: u16,
}

impl KeyInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn masked(&self) -> String {
        let len = self.buffer.chars().count();
        // Keep the field inside its cell; the tail is what was typed last
        let room = usize::from(self.width.saturating_sub(3)).max(1);
        std::iter::repeat_n(MASK, len.min(room)).collect()
    }
}

impl Widget for KeyInput {
    fn init(&mut self, _session: &Session) -> Option<Action> {
        self.buffer.clear();
        self.editing = true;
        Some(Action::InsertModeEntered)
    }

    fn update(&mut self, msg: &Msg, _session: &Session) -> Option<Action> {
        let Msg::Input(event) = msg else {
            return None;
        };

        if !self.editing {
            return match event {
                TuiEvent::Enter => {
                    self.editing = true;
                    Some(Action::InsertModeEntered)
                }
                _ => None,
            };
        }

        match event {
            TuiEvent::Enter => {
                let key = self.buffer.trim().to_string();
                if !key.is_empty() {
                    self.editing = false;
                    self.buffer.clear();
                }
                Some(Action::ApiKeyEntered(key))
            }
            TuiEvent::Escape => {
                self.editing = false;
                Some(Action::InsertModeExited)
            }
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
                None
            }
            TuiEvent::Paste(text) => {
                self.buffer.push_str(text.trim());
                None
            }
            TuiEvent::Backspace => {
                self.buffer.pop();
                None
            }
            _ => None,
        }
    }

    fn render(&self, session: &Session) -> Text<'static> {
        let mut field = vec![Span::raw("> "), Span::raw(self.masked())];
        if self.editing {
            field.push(Span::styled(" ", styles::cursor()));
        }

        let mut lines = vec![
            Line::from("Enter your DeepL API key"),
            Line::from(Span::styled(
                "Stored in ~/.tolk/credentials",
                styles::muted(),
            )),
            Line::default(),
            Line::from(field),
        ];
        if !session.status_message.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                session.status_message.clone(),
                styles::error(),
            )));
        }
        Text::from(lines)
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

    fn on_available_width_change(&mut self, width: u16) {
        self.width = width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{plain, test_session};

    fn input(event: TuiEvent) -> Msg {
        Msg::Input(event)
    }

    #[test]
    fn test_init_enters_insert_mode() {
        let session = test_session();
        let mut key_input = KeyInput::new();
        assert_eq!(key_input.init(&session), Some(Action::InsertModeEntered));
    }

    #[test]
    fn test_submit_trims_key() {
        let session = test_session();
        let mut key_input = KeyInput::new();
        key_input.init(&session);
        key_input.update(&input(TuiEvent::Paste(" abc:fx\n".to_string())), &session);
        key_input.update(&input(TuiEvent::InputChar('!')), &session);
        key_input.update(&input(TuiEvent::Backspace), &session);
        assert_eq!(
            key_input.update(&input(TuiEvent::Enter), &session),
            Some(Action::ApiKeyEntered("abc:fx".to_string()))
        );
        assert!(!key_input.editing);
    }

    #[test]
    fn test_empty_submit_keeps_editing() {
        let session = test_session();
        let mut key_input = KeyInput::new();
        key_input.init(&session);
        assert_eq!(
            key_input.update(&input(TuiEvent::Enter), &session),
            Some(Action::ApiKeyEntered(String::new()))
        );
        assert!(key_input.editing);
    }

    #[test]
    fn test_escape_then_enter_resumes() {
        let session = test_session();
        let mut key_input = KeyInput::new();
        key_input.init(&session);
        assert_eq!(
            key_input.update(&input(TuiEvent::Escape), &session),
            Some(Action::InsertModeExited)
        );
        assert_eq!(
            key_input.update(&input(TuiEvent::InputChar('a')), &session),
            None
        );
        assert_eq!(
            key_input.update(&input(TuiEvent::Enter), &session),
            Some(Action::InsertModeEntered)
        );
        assert!(key_input.buffer.is_empty());
    }

    #[test]
    fn test_render_masks_key() {
        let session = test_session();
        let mut key_input = KeyInput::new();
        key_input.on_available_width_change(40);
        key_input.init(&session);
        for c in "secret".chars() {
            key_input.update(&input(TuiEvent::InputChar(c)), &session);
        }
        let rendered = plain(&key_input.render(&session));
        assert!(rendered.contains("> •••••• "));
        assert!(!rendered.contains("secret"));
    }
}
