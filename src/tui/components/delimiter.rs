//! Vertical rule between the two text areas. Purely decorative; the main
//! screen marks its cell as not selectable.

use ratatui::text::{Line, Span, Text};

use crate::core::action::Action;
use crate::core::state::Session;
use crate::tui::components::text_area_height;
use crate::tui::layout::{Msg, Widget};
use crate::tui::styles;

#[derive(Default)]
pub struct Delimiter {
    active: bool,
}

impl Delimiter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Widget for Delimiter {
    fn update(&mut self, _msg: &Msg, _session: &Session) -> Option<Action> {
        None
    }

    fn render(&self, session: &Session) -> Text<'static> {
        let (margin, body) = text_area_height(session);
        let mut lines = Vec::with_capacity(body + 2 * margin);
        lines.extend(std::iter::repeat_n(Line::default(), margin));
        lines.extend(std::iter::repeat_n(
            Line::from(Span::styled("│", styles::delimiter())),
            body,
        ));
        lines.extend(std::iter::repeat_n(Line::default(), margin));
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
}
