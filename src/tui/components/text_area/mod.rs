//! # Text areas
//!
//! The two panes of the main screen.
//!
//! - **Source** is editable. Enter switches it to insert mode, Escape leaves
//!   it. Every edit is reported as `SourceTextChanged` so the session always
//!   holds what the user sees.
//! - **Target** is read-only and shows the last translation from the session.
//!
//! While editing, the pane scrolls to keep the cursor line visible.

mod text_wrap;

use ratatui::text::{Line, Span, Text};

use crate::core::action::Action;
use crate::core::state::Session;
use crate::tui::event::TuiEvent;
use crate::tui::layout::{Msg, Widget};
use crate::tui::styles;
use text_wrap::{
    CURSOR_MARK, VERTICAL_MARGIN, inner_width, next_char_boundary, prev_char_boundary,
    visible_lines, wrap_lines,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAreaKind {
    Source,
    Target,
}

pub struct TextArea {
    kind: TextAreaKind,
    buffer: String,
    /// Byte offset into `buffer`
    cursor: usize,
    editing: bool,
    active: bool,
    width: u16,
}

impl TextArea {
    pub fn source() -> Self {
        Self::new(TextAreaKind::Source)
    }

    pub fn target() -> Self {
        Self::new(TextAreaKind::Target)
    }

    fn new(kind: TextAreaKind) -> Self {
        Self {
            kind,
            buffer: String::new(),
            cursor: 0,
            editing: false,
            active: false,
            width: 0,
        }
    }

    fn placeholder(&self) -> &'static str {
        match self.kind {
            TextAreaKind::Source => "Type to translate.",
            TextAreaKind::Target => "The translation appears here.",
        }
    }

    fn changed(&self) -> Option<Action> {
        Some(Action::SourceTextChanged(self.buffer.clone()))
    }

    fn insert(&mut self, text: &str) -> Option<Action> {
        let text = without_cursor_mark(text);
        if text.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.cursor, &text);
        self.cursor += text.len();
        self.changed()
    }

    fn handle_editing(&mut self, event: &TuiEvent) -> Option<Action> {
        match event {
            TuiEvent::Escape => {
                self.editing = false;
                Some(Action::InsertModeExited)
            }
            TuiEvent::InputChar(c) => {
                let mut encoded = [0u8; 4];
                self.insert(c.encode_utf8(&mut encoded))
            }
            TuiEvent::Enter => self.insert("\n"),
            TuiEvent::Paste(text) => self.insert(text),
            TuiEvent::Backspace if self.cursor > 0 => {
                let start = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.replace_range(start..self.cursor, "");
                self.cursor = start;
                self.changed()
            }
            TuiEvent::Delete if self.cursor < self.buffer.len() => {
                let end = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.replace_range(self.cursor..end, "");
                self.changed()
            }
            TuiEvent::Left => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::Right if self.cursor < self.buffer.len() => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::Home => {
                self.cursor = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                None
            }
            TuiEvent::End => {
                self.cursor = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                None
            }
            _ => None,
        }
    }

    /// The text to show and whether it is the placeholder.
    fn content(&self, session: &Session) -> (String, bool) {
        match self.kind {
            TextAreaKind::Source if self.editing => {
                let (before, after) = self.buffer.split_at(self.cursor);
                (format!("{before}{CURSOR_MARK}{after}"), false)
            }
            TextAreaKind::Source if !self.buffer.is_empty() => (self.buffer.clone(), false),
            TextAreaKind::Target => match &session.translation {
                Some(t) if !t.text.is_empty() => (t.text.clone(), false),
                _ => (self.placeholder().to_string(), true),
            },
            TextAreaKind::Source => (self.placeholder().to_string(), true),
        }
    }
}

/// The cursor is drawn by splitting the buffer at `cursor` and inserting
/// `CURSOR_MARK` there, so the mark must never be part of the text itself.
fn without_cursor_mark(text: &str) -> String {
    text.chars().filter(|&c| c != CURSOR_MARK).collect()
}

/// Rows of margin above and below a text area, and rows of text in between.
pub fn text_area_height(session: &Session) -> (usize, usize) {
    (
        usize::from(VERTICAL_MARGIN),
        usize::from(visible_lines(session.content_height)),
    )
}

/// Split a wrapped line at the cursor mark, drawing the mark as a block.
fn styled_line(line: String, is_placeholder: bool) -> Vec<Span<'static>> {
    if is_placeholder {
        return vec![Span::styled(line, styles::placeholder())];
    }
    match line.split_once(CURSOR_MARK) {
        Some((before, after)) => vec![
            Span::raw(before.to_string()),
            Span::styled(" ", styles::cursor()),
            Span::raw(after.to_string()),
        ],
        None => vec![Span::raw(line)],
    }
}

impl Widget for TextArea {
    fn init(&mut self, session: &Session) -> Option<Action> {
        if self.kind == TextAreaKind::Source {
            self.buffer = without_cursor_mark(&session.source_text);
            self.cursor = self.buffer.len();
        }
        self.editing = false;
        None
    }

    fn update(&mut self, msg: &Msg, _session: &Session) -> Option<Action> {
        match msg {
            // The reducer drops insert mode when an error is shown
            Msg::Notify(Action::Error(_)) => {
                self.editing = false;
                None
            }
            Msg::Notify(_) => None,
            Msg::Input(_) if self.kind == TextAreaKind::Target => None,
            Msg::Input(event) if self.editing => self.handle_editing(event),
            Msg::Input(TuiEvent::Enter) => {
                self.editing = true;
                self.cursor = self.buffer.len();
                Some(Action::InsertModeEntered)
            }
            Msg::Input(_) => None,
        }
    }

    fn render(&self, session: &Session) -> Text<'static> {
        let (margin, height) = text_area_height(session);
        let (content, is_placeholder) = self.content(session);
        let wrapped = wrap_lines(&content, inner_width(self.width));

        // Keep the cursor line on screen while typing
        let cursor_line = wrapped
            .iter()
            .position(|line| line.contains(CURSOR_MARK))
            .unwrap_or(0);
        let skip = (cursor_line + 1).saturating_sub(height);

        let bar = if self.active {
            Span::styled("▎ ", styles::focus_bar())
        } else {
            Span::raw("  ")
        };

        let mut body: Vec<Line<'static>> = wrapped
            .into_iter()
            .skip(skip)
            .take(height)
            .map(|line| {
                let mut spans = vec![bar.clone()];
                spans.extend(styled_line(line, is_placeholder));
                Line::from(spans)
            })
            .collect();
        while body.len() < height {
            body.push(Line::from(bar.clone()));
        }

        let mut lines = Vec::with_capacity(height + 2 * margin);
        lines.extend(std::iter::repeat_n(Line::default(), margin));
        lines.extend(body);
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

    fn on_available_width_change(&mut self, width: u16) {
        self.width = width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deepl::Translation;
    use crate::test_support::{plain, test_session};

    fn input(event: TuiEvent) -> Msg {
        Msg::Input(event)
    }

    fn editing_source(session: &Session) -> TextArea {
        let mut area = TextArea::source();
        area.init(session);
        area.on_available_width_change(22);
        area.set_active();
        assert_eq!(
            area.update(&input(TuiEvent::Enter), session),
            Some(Action::InsertModeEntered)
        );
        area
    }

    fn type_str(area: &mut TextArea, text: &str, session: &Session) -> Option<Action> {
        text.chars()
            .map(|c| area.update(&input(TuiEvent::InputChar(c)), session))
            .last()
            .flatten()
    }

    #[test]
    fn test_enter_starts_and_escape_ends_insert_mode() {
        let session = test_session();
        let mut area = editing_source(&session);
        assert!(area.editing);
        assert_eq!(
            area.update(&input(TuiEvent::Escape), &session),
            Some(Action::InsertModeExited)
        );
        assert!(!area.editing);
    }

    #[test]
    fn test_typing_reports_whole_buffer() {
        let session = test_session();
        let mut area = editing_source(&session);
        assert_eq!(
            type_str(&mut area, "hallo", &session),
            Some(Action::SourceTextChanged("hallo".to_string()))
        );
        assert_eq!(
            area.update(&input(TuiEvent::Enter), &session),
            Some(Action::SourceTextChanged("hallo\n".to_string()))
        );
        assert_eq!(
            area.update(&input(TuiEvent::Paste("welt".to_string())), &session),
            Some(Action::SourceTextChanged("hallo\nwelt".to_string()))
        );
    }

    #[test]
    fn test_typing_outside_insert_mode_is_ignored() {
        let session = test_session();
        let mut area = TextArea::source();
        area.init(&session);
        assert_eq!(
            area.update(&input(TuiEvent::InputChar('x')), &session),
            None
        );
        assert_eq!(area.buffer, "");
    }

    #[test]
    fn test_cursor_editing_multibyte() {
        let session = test_session();
        let mut area = editing_source(&session);
        type_str(&mut area, "aé", &session);
        area.update(&input(TuiEvent::Left), &session);
        assert_eq!(
            area.update(&input(TuiEvent::Backspace), &session),
            Some(Action::SourceTextChanged("é".to_string()))
        );
        assert_eq!(area.update(&input(TuiEvent::Backspace), &session), None);
        assert_eq!(
            area.update(&input(TuiEvent::Delete), &session),
            Some(Action::SourceTextChanged(String::new()))
        );
        assert_eq!(area.update(&input(TuiEvent::Delete), &session), None);
    }

    #[test]
    fn test_home_end_stay_on_current_line() {
        let session = test_session();
        let mut area = editing_source(&session);
        type_str(&mut area, "ab\ncd", &session);
        area.update(&input(TuiEvent::Home), &session);
        assert_eq!(area.cursor, 3);
        area.update(&input(TuiEvent::End), &session);
        assert_eq!(area.cursor, 5);
    }

    #[test]
    fn test_init_loads_session_text() {
        let mut session = test_session();
        session.source_text = "kept".to_string();
        let mut area = TextArea::source();
        area.init(&session);
        assert_eq!(area.buffer, "kept");
        assert_eq!(area.cursor, 4);
    }

    #[test]
    fn test_error_notification_leaves_insert_mode() {
        let session = test_session();
        let mut area = editing_source(&session);
        area.update(&Msg::Notify(Action::Error("boom".to_string())), &session);
        assert!(!area.editing);
    }

    #[test]
    fn test_target_is_read_only() {
        let session = test_session();
        let mut area = TextArea::target();
        assert_eq!(area.update(&input(TuiEvent::Enter), &session), None);
        assert_eq!(
            area.update(&input(TuiEvent::InputChar('x')), &session),
            None
        );
    }

    #[test]
    fn test_render_placeholder_and_height() {
        let mut session = test_session();
        session.content_height = 9;
        let mut area = TextArea::source();
        area.on_available_width_change(22);
        let text = area.render(&session);
        // margin + 5 lines + margin
        assert_eq!(text.lines.len(), 7);
        assert_eq!(plain(&text).lines().nth(1), Some("  Type to translate."));
    }

    #[test]
    fn test_render_target_shows_translation() {
        let mut session = test_session();
        session.translation = Some(Translation {
            detected_source_language: None,
            text: "Hallo Welt".to_string(),
        });
        let mut area = TextArea::target();
        area.on_available_width_change(9);
        area.set_active();
        let rendered = plain(&area.render(&session));
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "▎ Hallo");
        assert_eq!(lines[2], "▎ Welt");
    }

    #[test]
    fn test_pasted_private_use_char_does_not_move_cursor() {
        let session = test_session();
        let mut area = editing_source(&session);
        let pasted = format!("1{CURSOR_MARK}\n2\n3\n4\n5");
        assert_eq!(
            area.update(&input(TuiEvent::Paste(pasted)), &session),
            Some(Action::SourceTextChanged("1\n2\n3\n4\n5".to_string()))
        );
        assert_eq!(area.cursor, area.buffer.len());

        let rendered = plain(&area.render(&session));
        let body: Vec<&str> = rendered.lines().skip(1).take(3).collect();
        assert_eq!(body, ["▎ 3", "▎ 4", "▎ 5 "]);
    }

    #[test]
    fn test_render_scrolls_to_cursor() {
        let session = test_session();
        let mut area = editing_source(&session);
        type_str(&mut area, "1\n2\n3\n4\n5", &session);
        let rendered = plain(&area.render(&session));
        let body: Vec<&str> = rendered.lines().skip(1).take(3).collect();
        assert_eq!(body, ["▎ 3", "▎ 4", "▎ 5 "]);
    }
}
