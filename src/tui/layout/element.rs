use std::fmt;

use log::error;
use ratatui::layout::Alignment;
use ratatui::text::Text;

use super::place::{is_blank, place_horizontal};
use super::widget::{Msg, Widget};
use crate::core::action::Action;
use crate::core::state::Session;

/// How an element claims horizontal space inside its row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sizing {
    /// Occupies a cell, renders nothing, never focusable.
    Empty,
    /// Exactly this many columns.
    Fixed(u16),
    /// `floor(fraction * row_width)` columns.
    Fill(f64),
    /// An equal share of whatever the Fixed and Fill siblings leave over.
    FillAuto,
}

/// A widget bound to a sizing policy and an alignment.
///
/// The element owns its widget. The only fields that change after
/// construction are the derived `calculated_width` and the widget's own state.
pub struct PositionalElement {
    widget: Option<Box<dyn Widget>>,
    sizing: Sizing,
    alignment: Alignment,
    selectable: bool,
    calculated_width: u16,
}

impl PositionalElement {
    /// Filler cell. Keeps rows the same length without taking space.
    pub fn empty() -> Self {
        Self {
            widget: None,
            sizing: Sizing::Empty,
            alignment: Alignment::Left,
            selectable: false,
            calculated_width: 0,
        }
    }

    pub fn fixed(widget: impl Widget + 'static, alignment: Alignment, width: u16) -> Self {
        Self::with_widget(Box::new(widget), Sizing::Fixed(width), alignment)
    }

    /// `fraction` of the row width, e.g. `0.5` for half of it.
    pub fn fill(widget: impl Widget + 'static, alignment: Alignment, fraction: f64) -> Self {
        Self::with_widget(Box::new(widget), Sizing::Fill(fraction), alignment)
    }

    pub fn fill_auto(widget: impl Widget + 'static, alignment: Alignment) -> Self {
        Self::with_widget(Box::new(widget), Sizing::FillAuto, alignment)
    }

    fn with_widget(widget: Box<dyn Widget>, sizing: Sizing, alignment: Alignment) -> Self {
        Self {
            widget: Some(widget),
            sizing,
            alignment,
            selectable: true,
            calculated_width: 0,
        }
    }

    /// The element is rendered but navigation skips it.
    pub fn not_selectable(mut self) -> Self {
        self.selectable = false;
        self
    }

    pub fn sizing(&self) -> Sizing {
        self.sizing
    }

    pub fn calculated_width(&self) -> u16 {
        self.calculated_width
    }

    /// Whether navigation may land here.
    pub fn is_selectable(&self) -> bool {
        self.selectable && self.widget.is_some() && self.sizing != Sizing::Empty
    }

    pub fn is_active(&self) -> bool {
        self.widget.as_ref().is_some_and(|w| w.is_active())
    }

    /// Width this element takes in a row of `row_width` columns.
    ///
    /// # Panics
    ///
    /// `FillAuto` depends on its siblings, so its width must be supplied by
    /// the row as `width_per_auto`. Asking for it without one is a bug in the
    /// caller.
    pub fn width_for(&self, row_width: u16, width_per_auto: Option<u16>) -> u16 {
        match self.sizing {
            Sizing::Empty => 0,
            Sizing::Fixed(width) => width,
            // Float to int `as` saturates, so fractions outside 0..=1 cannot wrap
            Sizing::Fill(fraction) => (f64::from(row_width) * fraction).floor() as u16,
            Sizing::FillAuto => match width_per_auto {
                Some(width) => width,
                None => {
                    error!("width_for called on a FillAuto element without a per-unit width");
                    panic!("FillAuto element has no resolved per-unit width");
                }
            },
        }
    }

    pub(super) fn apply_width(&mut self, width: u16) {
        self.calculated_width = width;
        if let Some(widget) = self.widget.as_mut() {
            widget.on_available_width_change(width);
        }
    }

    pub(super) fn set_active(&mut self) {
        if let Some(widget) = self.widget.as_mut() {
            widget.set_active();
        }
    }

    pub(super) fn unset_active(&mut self) {
        if let Some(widget) = self.widget.as_mut() {
            widget.unset_active();
        }
    }

    pub(super) fn init(&mut self, session: &Session) -> Option<Action> {
        self.widget.as_mut().and_then(|w| w.init(session))
    }

    pub(super) fn update(&mut self, msg: &Msg, session: &Session) -> Option<Action> {
        self.widget.as_mut().and_then(|w| w.update(msg, session))
    }

    /// The widget's content placed inside `calculated_width` columns.
    ///
    /// Returns `None` when there is nothing to show: an `Empty` cell, or a
    /// zero-width cell whose widget rendered nothing.
    pub fn render(&self, session: &Session) -> Option<Text<'static>> {
        if self.sizing == Sizing::Empty {
            return None;
        }
        let content = self
            .widget
            .as_ref()
            .map(|w| w.render(session))
            .unwrap_or_default();
        let placed = place_horizontal(content, self.calculated_width, self.alignment);
        (!is_blank(&placed)).then_some(placed)
    }
}

impl fmt::Debug for PositionalElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionalElement")
            .field("sizing", &self.sizing)
            .field("alignment", &self.alignment)
            .field("selectable", &self.selectable)
            .field("calculated_width", &self.calculated_width)
            .field("has_widget", &self.widget.is_some())
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Probe, event_log, plain, test_session};

    #[test]
    fn test_width_for_each_policy() {
        let log = event_log();
        assert_eq!(PositionalElement::empty().width_for(80, None), 0);
        assert_eq!(
            PositionalElement::fixed(Probe::new("a", &log), Alignment::Left, 7).width_for(80, None),
            7
        );
        assert_eq!(
            PositionalElement::fill(Probe::new("b", &log), Alignment::Left, 0.25).width_for(81, None),
            20
        );
        assert_eq!(
            PositionalElement::fill_auto(Probe::new("c", &log), Alignment::Left)
                .width_for(80, Some(13)),
            13
        );
    }

    #[test]
    #[should_panic(expected = "FillAuto")]
    fn test_fill_auto_without_unit_width_panics() {
        let log = event_log();
        PositionalElement::fill_auto(Probe::new("c", &log), Alignment::Left).width_for(80, None);
    }

    #[test]
    fn test_selectable_rules() {
        let log = event_log();
        assert!(!PositionalElement::empty().is_selectable());
        assert!(PositionalElement::fixed(Probe::new("a", &log), Alignment::Left, 3).is_selectable());
        assert!(
            !PositionalElement::fixed(Probe::new("a", &log), Alignment::Left, 3)
                .not_selectable()
                .is_selectable()
        );
    }

    #[test]
    fn test_set_active_is_idempotent() {
        let log = event_log();
        let mut el = PositionalElement::fixed(Probe::new("a", &log), Alignment::Left, 3);
        el.set_active();
        el.set_active();
        assert!(el.is_active());
        el.unset_active();
        assert!(!el.is_active());
    }

    #[test]
    fn test_focus_on_empty_is_noop() {
        let mut el = PositionalElement::empty();
        el.set_active();
        assert!(!el.is_active());
    }

    #[test]
    fn test_apply_width_notifies_widget() {
        let log = event_log();
        let mut el = PositionalElement::fill_auto(Probe::new("a", &log), Alignment::Left);
        el.apply_width(42);
        assert_eq!(el.calculated_width(), 42);
        assert_eq!(log.borrow().as_slice(), ["width:a:42"]);
    }

    #[test]
    fn test_render_aligns_inside_calculated_width() {
        let log = event_log();
        let session = test_session();
        let mut el = PositionalElement::fixed(Probe::new("ab", &log), Alignment::Center, 6);
        el.apply_width(6);
        assert_eq!(plain(&el.render(&session).unwrap()), "  ab  ");
    }

    #[test]
    fn test_render_empty_is_none() {
        let session = test_session();
        assert!(PositionalElement::empty().render(&session).is_none());
    }

    #[test]
    fn test_render_zero_width_is_legal() {
        let log = event_log();
        let session = test_session();
        let blank = PositionalElement::fixed(Probe::new("", &log), Alignment::Left, 0);
        assert!(blank.render(&session).is_none());

        // Content wider than the allocation overflows instead of being cut
        let overflow = PositionalElement::fixed(Probe::new("abc", &log), Alignment::Left, 0);
        assert_eq!(plain(&overflow.render(&session).unwrap()), "abc");
    }
}
