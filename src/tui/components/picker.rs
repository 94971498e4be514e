//! # Picker
//!
//! A filterable list filling the language and formality screens.
//!
//! ## Keys
//!
//! | key            | browsing                  | filtering              |
//! |----------------|---------------------------|------------------------|
//! | `↑`/`k` `↓`/`j`| move selection            | move selection (arrows)|
//! | `/`            | start filtering           | typed into the filter  |
//! | `Enter`        | choose selected item      | keep filter, browse    |
//! | `Esc`          | leave without choosing    | clear filter, browse   |
//!
//! Filtering captures plain keys, so it is announced to the host as insert
//! mode.
//!
//! Language lists come from the shared cache. If the cache is still empty
//! when the screen opens, `init` asks the host to fetch them and the list
//! fills in on `LanguagesReceived`.

use ratatui::text::{Line, Span, Text};

use crate::core::action::Action;
use crate::core::state::Session;
use crate::deepl::{Formality, Language};
use crate::tui::event::TuiEvent;
use crate::tui::layout::{Msg, Widget};
use crate::tui::styles;

/// Rows of a picker screen that are not list items: title, filter line and
/// the blank line between them and the list.
const CHROME_ROWS: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    SourceLanguage,
    TargetLanguage,
    Formality,
}

impl PickerKind {
    fn title(self) -> &'static str {
        match self {
            PickerKind::SourceLanguage => "Source language",
            PickerKind::TargetLanguage => "Target language",
            PickerKind::Formality => "Formality",
        }
    }

    /// Entries for this picker, or `None` while the language lists are unknown.
    fn items(self, session: &Session) -> Option<Vec<PickerItem>> {
        match self {
            PickerKind::SourceLanguage => session.languages.source().map(|list| {
                list.into_iter()
                    .map(|l| PickerItem::language(l, Action::SourceLanguageSelected))
                    .collect()
            }),
            PickerKind::TargetLanguage => session.languages.target().map(|list| {
                list.into_iter()
                    .map(|l| PickerItem::language(l, Action::TargetLanguageSelected))
                    .collect()
            }),
            PickerKind::Formality => Some(
                Formality::ALL
                    .iter()
                    .map(|&f| PickerItem {
                        key: f.label().to_string(),
                        label: f.label().to_string(),
                        action: Action::FormalitySelected(f),
                    })
                    .collect(),
            ),
        }
    }

    /// Key of the entry matching the session's current choice.
    fn current_key(self, session: &Session) -> Option<String> {
        match self {
            PickerKind::SourceLanguage => session.source_language.as_ref().map(|l| l.language.clone()),
            PickerKind::TargetLanguage => session.target_language.as_ref().map(|l| l.language.clone()),
            PickerKind::Formality => Some(session.formality.label().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PickerItem {
    key: String,
    label: String,
    action: Action,
}

impl PickerItem {
    fn language(language: Language, select: fn(Language) -> Action) -> Self {
        Self {
            key: language.language.clone(),
            label: format!("{} - {}", language.language, language.name),
            action: select(language),
        }
    }

    fn matches(&self, filter: &str) -> bool {
        self.label.to_lowercase().contains(&filter.to_lowercase())
    }
}

pub struct Picker {
    kind: PickerKind,
    items: Vec<PickerItem>,
    filter: String,
    filtering: bool,
    /// Index into the filtered entries
    selected: usize,
    active: bool,
}

impl Picker {
    pub fn new(kind: PickerKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            filter: String::new(),
            filtering: false,
            selected: 0,
            active: false,
        }
    }

    fn visible_items(&self) -> Vec<&PickerItem> {
        self.items
            .iter()
            .filter(|item| item.matches(&self.filter))
            .collect()
    }

    fn reload(&mut self, session: &Session) -> bool {
        let Some(items) = self.kind.items(session) else {
            return false;
        };
        self.items = items;
        self.filter.clear();
        self.selected = self
            .kind
            .current_key(session)
            .and_then(|key| self.items.iter().position(|item| item.key == key))
            .unwrap_or(0);
        true
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.visible_items().len();
        if count == 0 {
            self.selected = 0;
            return;
        }
        self.selected = self
            .selected
            .saturating_add_signed(delta)
            .min(count - 1);
    }

    fn set_filter(&mut self, filter: String) {
        self.filter = filter;
        self.selected = 0;
    }

    fn handle_filtering(&mut self, event: &TuiEvent) -> Option<Action> {
        match event {
            TuiEvent::Enter => {
                self.filtering = false;
                Some(Action::InsertModeExited)
            }
            TuiEvent::Escape => {
                self.filtering = false;
                self.set_filter(String::new());
                Some(Action::InsertModeExited)
            }
            TuiEvent::InputChar(c) => {
                let mut filter = std::mem::take(&mut self.filter);
                filter.push(*c);
                self.set_filter(filter);
                None
            }
            TuiEvent::Paste(text) => {
                let filter = format!("{}{}", self.filter, text.replace('\n', " "));
                self.set_filter(filter);
                None
            }
            TuiEvent::Backspace => {
                let mut filter = std::mem::take(&mut self.filter);
                filter.pop();
                self.set_filter(filter);
                None
            }
            TuiEvent::Up => {
                self.move_selection(-1);
                None
            }
            TuiEvent::Down => {
                self.move_selection(1);
                None
            }
            _ => None,
        }
    }

    fn handle_browsing(&mut self, event: &TuiEvent) -> Option<Action> {
        match event {
            TuiEvent::Up | TuiEvent::InputChar('k') => {
                self.move_selection(-1);
                None
            }
            TuiEvent::Down | TuiEvent::InputChar('j') => {
                self.move_selection(1);
                None
            }
            TuiEvent::Home => {
                self.selected = 0;
                None
            }
            TuiEvent::End => {
                self.move_selection(isize::MAX);
                None
            }
            TuiEvent::InputChar('/') => {
                self.filtering = true;
                Some(Action::InsertModeEntered)
            }
            TuiEvent::Enter => self
                .visible_items()
                .get(self.selected)
                .map(|item| item.action.clone()),
            TuiEvent::Escape => Some(Action::PickerDismissed),
            _ => None,
        }
    }

    fn status_line(&self, session: &Session) -> Line<'static> {
        if self.filtering {
            Line::from(vec![
                Span::raw(format!("Filter: {}", self.filter)),
                Span::styled(" ", styles::cursor()),
            ])
        } else if !self.filter.is_empty() {
            Line::from(Span::styled(
                format!("Filter: {}", self.filter),
                styles::muted(),
            ))
        } else if self.items.is_empty() && session.languages_pending {
            Line::from(Span::styled("Loading languages...", styles::muted()))
        } else {
            Line::default()
        }
    }
}

impl Widget for Picker {
    fn init(&mut self, session: &Session) -> Option<Action> {
        self.filtering = false;
        if self.reload(session) {
            None
        } else {
            Some(Action::LanguagesRequested)
        }
    }

    fn update(&mut self, msg: &Msg, session: &Session) -> Option<Action> {
        match msg {
            Msg::Notify(Action::LanguagesReceived) => {
                self.reload(session);
                None
            }
            Msg::Notify(_) => None,
            Msg::Input(event) if self.filtering => self.handle_filtering(event),
            Msg::Input(event) => self.handle_browsing(event),
        }
    }

    fn render(&self, session: &Session) -> Text<'static> {
        let visible = self.visible_items();
        let rows = usize::from(session.content_height.saturating_sub(CHROME_ROWS).max(1));
        // Scroll so the selection stays in the window
        let skip = (self.selected + 1).saturating_sub(rows);

        let mut lines = vec![
            Line::from(Span::styled(
                format!("  {}  ", self.kind.title()),
                styles::list_title(),
            )),
            self.status_line(session),
            Line::default(),
        ];

        if visible.is_empty() && !self.items.is_empty() {
            lines.push(Line::from(Span::styled("  No matches", styles::muted())));
        }

        lines.extend(
            visible
                .iter()
                .enumerate()
                .skip(skip)
                .take(rows)
                .map(|(index, item)| {
                    if index == self.selected {
                        Line::from(Span::styled(
                            format!("> {}", item.label),
                            styles::list_selected(),
                        ))
                    } else {
                        Line::from(format!("  {}", item.label))
                    }
                }),
        );

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
