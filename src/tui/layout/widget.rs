use ratatui::text::Text;

use crate::core::action::Action;
use crate::core::state::Session;
use crate::tui::event::TuiEvent;

/// What a grid forwards to its widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// A key press or paste, routed to the focused widget only.
    Input(TuiEvent),
    /// A semantic event the host wants every widget of the screen to see
    /// (a translation arrived, the language lists were fetched, ...).
    Notify(Action),
}

/// An element that can be placed in a layout grid.
///
/// Widgets follow an Elm-like contract:
/// - They receive the session as a read-only prop, never a handle to mutate it.
/// - They change their own state only inside `update` and the focus hooks.
/// - Anything the rest of the application must react to is returned as an
///   `Action` and bubbles up to the host untouched.
///
/// # Ownership
///
/// A widget is boxed into exactly one `PositionalElement`. The grid addresses
/// it by `(x, y)` and mutates it in place, so no widget ever needs to be cast
/// back to its concrete type.
pub trait Widget {
    /// One-time setup, called by `Grid::init` each time its screen is entered.
    fn init(&mut self, _session: &Session) -> Option<Action> {
        None
    }

    /// Handle a message and optionally return an action for the host.
    fn update(&mut self, msg: &Msg, session: &Session) -> Option<Action>;

    /// Render the current content. Must not change any state.
    ///
    /// The width is whatever `on_available_width_change` last reported; the
    /// grid takes care of aligning the result inside that width.
    fn render(&self, session: &Session) -> Text<'static>;

    fn is_active(&self) -> bool;

    /// Focus styling only. Calling it twice is the same as calling it once.
    fn set_active(&mut self);

    fn unset_active(&mut self);

    /// Called every time the owning row recomputes its widths.
    fn on_available_width_change(&mut self, _width: u16) {}
}
