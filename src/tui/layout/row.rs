use log::{debug, warn};
use ratatui::text::Text;

use super::element::{PositionalElement, Sizing};
use super::place::join_horizontal;
use crate::core::state::Session;

/// One line of a grid: elements laid out left to right.
///
/// Widths are resolved once per `resize`, not on every render.
pub struct Row {
    elements: Vec<PositionalElement>,
    width: u16,
}

impl Row {
    pub fn new(elements: Vec<PositionalElement>) -> Self {
        Self { elements, width: 0 }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Total width last handed to `resize`.
    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn get(&self, x: usize) -> Option<&PositionalElement> {
        self.elements.get(x)
    }

    pub(super) fn get_mut(&mut self, x: usize) -> Option<&mut PositionalElement> {
        self.elements.get_mut(x)
    }

    pub fn elements(&self) -> &[PositionalElement] {
        &self.elements
    }

    pub(super) fn elements_mut(&mut self) -> &mut [PositionalElement] {
        &mut self.elements
    }

    /// Width of one `FillAuto` share for a row of `total_width` columns.
    ///
    /// Fixed and Fill elements are served first; the rest is split evenly
    /// (rounding down) across the `FillAuto` elements. `None` when the row
    /// has no `FillAuto` element. If the fixed part alone exceeds the row,
    /// a warning is logged and every share is 0.
    pub fn auto_unit_width(&self, total_width: u16) -> Option<u16> {
        let fixed_sum: u32 = self
            .elements
            .iter()
            .filter(|el| el.sizing() != Sizing::FillAuto)
            .map(|el| u32::from(el.width_for(total_width, None)))
            .sum();
        let auto_count = self
            .elements
            .iter()
            .filter(|el| el.sizing() == Sizing::FillAuto)
            .count() as u32;

        if fixed_sum > u32::from(total_width) {
            warn!(
                "Row overflows: fixed elements need {} columns, only {} available",
                fixed_sum, total_width
            );
        }

        if auto_count == 0 {
            return None;
        }

        let remaining = u32::from(total_width).saturating_sub(fixed_sum);
        // remaining <= total_width, so the share always fits back into u16
        Some((remaining / auto_count) as u16)
    }

    /// Recompute every element's width for a new total width.
    pub fn resize(&mut self, total_width: u16) {
        self.width = total_width;
        let per_auto = self.auto_unit_width(total_width);
        debug!(
            "Row resized to {} columns ({} elements, auto unit {:?})",
            total_width,
            self.elements.len(),
            per_auto
        );

        for el in &mut self.elements {
            let width = el.width_for(total_width, per_auto);
            el.apply_width(width);
        }
    }

    /// Render elements side by side. Elements with nothing to show are left
    /// out entirely; `None` if that leaves nothing.
    pub fn render(&self, session: &Session) -> Option<Text<'static>> {
        let blocks: Vec<Text<'static>> = self
            .elements
            .iter()
            .filter_map(|el| el.render(session))
            .collect();

        (!blocks.is_empty()).then(|| join_horizontal(blocks))
    }
}
