//! # Views
//!
//! One grid per screen, built once at startup and kept for the whole run so
//! widget state (typed text, list position) survives switching screens.
//!
//! ```text
//! Main
//! ┌───────────────────────┬───┬────────────┬────────────┐
//! │ Source: auto          │   │ Target: …  │ Formality: │
//! ├───────────────────────┼───┼────────────┼────────────┤
//! │ source text      (auto│ │ │ target text│            │
//! ├───────────────────────┼───┼────────────┼────────────┤
//! │       Translate       │   │            │            │
//! └───────────────────────┴───┴────────────┴────────────┘
//! ```
//!
//! The pickers, login and error screens are 1×1 grids.

use std::collections::HashMap;

use ratatui::layout::Alignment;

use crate::core::state::ViewId;
use crate::tui::components::{
    Button, Delimiter, ErrorMessage, KeyInput, Picker, PickerKind, TextArea,
};
use crate::tui::layout::{Grid, LayoutError, PositionalElement, Row};

/// Columns between the two text areas.
const DELIMITER_WIDTH: u16 = 5;

pub fn main_view() -> Result<Grid, LayoutError> {
    Grid::new(vec![
        Row::new(vec![
            PositionalElement::fill(Button::source_language(), Alignment::Left, 0.5),
            PositionalElement::empty(),
            PositionalElement::fill(Button::target_language(), Alignment::Left, 0.25),
            PositionalElement::fill(Button::formality(), Alignment::Right, 0.25),
        ]),
        Row::new(vec![
            PositionalElement::fill_auto(TextArea::source(), Alignment::Left),
            PositionalElement::fixed(Delimiter::new(), Alignment::Center, DELIMITER_WIDTH)
                .not_selectable(),
            PositionalElement::fill_auto(TextArea::target(), Alignment::Left),
            PositionalElement::empty(),
        ]),
        Row::new(vec![
            PositionalElement::fill_auto(Button::translate(), Alignment::Center),
            PositionalElement::empty(),
            PositionalElement::empty(),
            PositionalElement::empty(),
        ]),
    ])
}

fn picker_view(kind: PickerKind) -> Result<Grid, LayoutError> {
    Grid::new(vec![Row::new(vec![PositionalElement::fill_auto(
        Picker::new(kind),
        Alignment::Left,
    )])])
}

fn login_view() -> Result<Grid, LayoutError> {
    Grid::new(vec![Row::new(vec![PositionalElement::fill_auto(
        KeyInput::new(),
        Alignment::Left,
    )])])
}

fn error_view() -> Result<Grid, LayoutError> {
    Grid::new(vec![Row::new(vec![
        PositionalElement::fill_auto(ErrorMessage::new(), Alignment::Left).not_selectable(),
    ])])
}

pub fn build(view: ViewId) -> Result<Grid, LayoutError> {
    match view {
        ViewId::Main => main_view(),
        ViewId::SourceLanguage => picker_view(PickerKind::SourceLanguage),
        ViewId::TargetLanguage => picker_view(PickerKind::TargetLanguage),
        ViewId::Formality => picker_view(PickerKind::Formality),
        ViewId::Login => login_view(),
        ViewId::Error => error_view(),
    }
}

/// Whether arrow keys move the focus on this screen. Elsewhere they go to
/// the widget (list selection).
pub fn navigates(view: ViewId) -> bool {
    view == ViewId::Main
}

/// Every screen's grid.
pub struct Views {
    grids: HashMap<ViewId, Grid>,
}

impl Views {
    pub fn new() -> Result<Self, LayoutError> {
        let grids = ViewId::ALL
            .iter()
            .map(|&view| build(view).map(|grid| (view, grid)))
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(Self { grids })
    }

    pub fn get(&self, view: ViewId) -> Option<&Grid> {
        self.grids.get(&view)
    }

    pub fn get_mut(&mut self, view: ViewId) -> Option<&mut Grid> {
        self.grids.get_mut(&view)
    }

    /// Resize every grid, visible or not, so switching never shows stale widths.
    pub fn resize(&mut self, width: u16, height: u16) {
        for grid in self.grids.values_mut() {
            grid.resize(width, height);
        }
    }
}
