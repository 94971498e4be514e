//! # Frame chrome
//!
//! Widgets inside a grid render to `Text` and let the layout place them.
//! The few pieces drawn around the grid (header, help bar) render straight
//! into the frame instead, through this trait.

use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of screen chrome.
///
/// Components follow the props pattern: everything they show is passed in
/// as struct fields when they are built for a frame.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
