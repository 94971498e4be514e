//! Error screen content. Not selectable: any key on the error screen is
//! handled by the host, which dismisses the error.

use ratatui::text::{Line, Span, Text};

use crate::core::action::Action;
use crate::core::state::Session;
use crate::tui::layout::{Msg, Widget};
use crate::tui::styles;

#[derive(Default)]
pub struct ErrorMessage {
    active: bool,
    width: u16,
}

impl ErrorMessage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Widget for ErrorMessage {
    fn update(&mut self, _msg: &Msg, _session: &Session) -> Option<Action> {
        None
    }

    fn render(&self, session: &Session) -> Text<'static> {
        let message = session.error.as_deref().unwrap_or("Unknown error");
        let width = usize::from(self.width).max(1);

        let mut lines = vec![
            Line::from(Span::styled("Error", styles::error())),
            Line::default(),
        ];
        lines.extend(
            textwrap::wrap(message, width)
                .into_iter()
                .map(|line| Line::from(Span::styled(line.into_owned(), styles::error()))),
        );
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Press any key to continue",
            styles::muted(),
        )));
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
