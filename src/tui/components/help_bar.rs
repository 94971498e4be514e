//! Key hints at the bottom of the screen.
//!
//! The short form is one line of the keys that matter on the current screen.
//! `?` toggles the full form, which adds the keys that work everywhere.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;

use crate::core::state::{Session, ViewId};
use crate::tui::component::Component;
use crate::tui::styles;

type Binding = (&'static str, &'static str);

const GLOBAL: &[Binding] = &[
    ("ctrl+c", "force quit"),
    ("q", "quit (outside insert mode)"),
    ("?", "toggle help"),
];

pub struct HelpBar {
    pub bindings: Vec<Binding>,
    pub full: bool,
}

impl HelpBar {
    pub fn from_session(session: &Session) -> Self {
        Self {
            bindings: bindings_for(session.view, session.insert_mode),
            full: session.show_full_help,
        }
    }

    /// Rows needed to draw the bar.
    pub fn height(&self) -> u16 {
        if self.full {
            // short line + blank + one line per global binding
            2 + GLOBAL.len() as u16
        } else {
            1
        }
    }

    fn text(&self) -> Text<'static> {
        let mut spans = Vec::new();
        for (index, (key, what)) in self.bindings.iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled(" • ", styles::muted()));
            }
            spans.push(Span::raw(*key));
            spans.push(Span::styled(format!(" {what}"), styles::muted()));
        }
        if !self.full {
            spans.push(Span::styled(" • ", styles::muted()));
            spans.push(Span::raw("?"));
            spans.push(Span::styled(" more", styles::muted()));
        }

        let mut lines = vec![Line::from(spans)];
        if self.full {
            lines.push(Line::default());
            lines.extend(GLOBAL.iter().map(|(key, what)| {
                Line::from(vec![
                    Span::raw(format!("{key:<8}")),
                    Span::styled(*what, styles::muted()),
                ])
            }));
        }
        Text::from(lines)
    }
}

fn bindings_for(view: ViewId, insert_mode: bool) -> Vec<Binding> {
    match (view, insert_mode) {
        (ViewId::Main, false) => vec![
            ("←↓↑→/hjkl", "move"),
            ("enter", "select"),
        ],
        (ViewId::Main, true) => vec![("esc", "stop editing"), ("enter", "new line")],
        (ViewId::SourceLanguage | ViewId::TargetLanguage | ViewId::Formality, false) => vec![
            ("↑/k ↓/j", "move"),
            ("/", "filter"),
            ("enter", "choose"),
            ("esc", "back"),
        ],
        (ViewId::SourceLanguage | ViewId::TargetLanguage | ViewId::Formality, true) => {
            vec![("enter", "apply filter"), ("esc", "clear filter")]
        }
        (ViewId::Login, true) => vec![("enter", "save key"), ("esc", "stop editing")],
        (ViewId::Login, false) => vec![("enter", "edit key")],
        (ViewId::Error, _) => vec![("any key", "continue")],
    }
}

impl Component for HelpBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(self.text()), area);
    }
}
