//! # Header
//!
//! Top bar: application name on the left, version on the right and the
//! current status in between.
//!
//! Status priority, most important first:
//!
//! 1. **Loading**: `" Loading..."` while a request is in flight
//! 2. **Status message**: the last message set by the reducer
//! 3. **Nothing**
//!
//! Stateless: built from the session for each frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::state::Session;
use crate::tui::component::Component;
use crate::tui::styles;

pub struct Header {
    pub title: String,
    pub version: String,
    pub status: String,
}

impl Header {
    pub fn new(title: String, version: String, status: String) -> Self {
        Self {
            title,
            version,
            status,
        }
    }

    pub fn from_session(session: &Session) -> Self {
        let status = if session.is_loading {
            "Loading...".to_string()
        } else {
            session.status_message.clone()
        };
        Self::new(
            "tolk".to_string(),
            format!("v{}", env!("CARGO_PKG_VERSION")),
            status,
        )
    }

    fn line(&self, width: u16) -> Line<'static> {
        let left = format!(" {} ", self.title);
        let right = format!(" {} ", self.version);
        let middle = if self.status.is_empty() {
            String::new()
        } else {
            format!(" {}", self.status)
        };

        let used = left.width() + right.width();
        let spacer = usize::from(width).saturating_sub(used);
        let middle = truncate_to_width(&middle, spacer);
        let padding = spacer.saturating_sub(middle.width());

        Line::from(vec![
            Span::styled(left, styles::header()),
            Span::raw(middle),
            Span::raw(" ".repeat(padding)),
            Span::styled(right, styles::header()),
        ])
    }
}

/// Longest prefix of `text` that fits in `max` display columns.
fn truncate_to_width(text: &str, max: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= max
        })
        .collect()
}

impl Component for Header {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(area.width), area);
    }
}
