use std::fmt;

use log::{debug, error};
use ratatui::text::Text;

use super::element::PositionalElement;
use super::place::join_vertical;
use super::row::Row;
use super::widget::Msg;
use crate::core::action::Action;
use crate::core::state::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Rows of a grid must all have the same number of elements.
    UnequalRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A focus coordinate outside the grid.
    OutOfBounds {
        x: usize,
        y: usize,
        columns: usize,
        rows: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::UnequalRows {
                row,
                expected,
                found,
            } => write!(
                f,
                "layout rows must have the same number of elements: row {row} has {found}, expected {expected}"
            ),
            LayoutError::OutOfBounds {
                x,
                y,
                columns,
                rows,
            } => write!(
                f,
                "focus ({x}, {y}) is outside the {columns}x{rows} layout"
            ),
        }
    }
}

impl std::error::Error for LayoutError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A matrix of widgets with a single focused cell.
///
/// `x` is the column, `y` the row. Focus moves only through `set_focus` and
/// the `navigate_*` family, so at most one element is active at a time.
pub struct Grid {
    rows: Vec<Row>,
    width: u16,
    height: u16,
    col_count: usize,
    row_count: usize,
    active: (usize, usize),
}

impl Grid {
    /// Build a grid from rows of equal length.
    pub fn new(rows: Vec<Row>) -> Result<Self, LayoutError> {
        let col_count = rows.first().map(Row::len).unwrap_or(0);

        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != col_count)
        {
            return Err(LayoutError::UnequalRows {
                row: index,
                expected: col_count,
                found: row.len(),
            });
        }

        let row_count = rows.len();
        Ok(Self {
            rows,
            width: 0,
            height: 0,
            col_count,
            row_count,
            active: (0, 0),
        })
    }

    pub fn col_count(&self) -> usize {
        self.col_count
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Dimensions last handed to `resize`.
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// A grid without cells. Nothing can be focused and navigation is inert.
    pub fn is_degenerate(&self) -> bool {
        self.col_count == 0 || self.row_count == 0
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&PositionalElement> {
        self.rows.get(y).and_then(|row| row.get(x))
    }

    fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut PositionalElement> {
        self.rows.get_mut(y).and_then(|row| row.get_mut(x))
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Focus coordinate as `(x, y)`, or `None` for a degenerate grid.
    pub fn active_position(&self) -> Option<(usize, usize)> {
        (!self.is_degenerate()).then_some(self.active)
    }

    /// The focused element, or `None` for a degenerate grid.
    pub fn active(&self) -> Option<&PositionalElement> {
        let (x, y) = self.active_position()?;
        self.get(x, y)
    }

    /// Run every widget's init hook, then focus the stored coordinate
    /// (`(0, 0)` for a fresh grid).
    ///
    /// The start cell is focused even if it is not selectable; the first
    /// navigation moves off it.
    pub fn init(&mut self, session: &Session) -> Vec<Action> {
        let actions: Vec<Action> = self
            .rows
            .iter_mut()
            .flat_map(|row| row.elements_mut().iter_mut())
            .filter_map(|el| el.init(session))
            .collect();

        if let Some((x, y)) = self.active_position() {
            self.set_focus(x, y);
        }

        actions
    }

    /// Forward `msg` to the focused widget only.
    pub fn update_active(&mut self, msg: &Msg, session: &Session) -> Option<Action> {
        let (x, y) = self.active_position()?;
        self.get_mut(x, y)?.update(msg, session)
    }

    /// Forward `msg` to every widget, row by row, left to right.
    pub fn update_all(&mut self, msg: &Msg, session: &Session) -> Vec<Action> {
        self.rows
            .iter_mut()
            .flat_map(|row| row.elements_mut().iter_mut())
            .filter_map(|el| el.update(msg, session))
            .collect()
    }

    /// Move focus to `(x, y)`.
    ///
    /// # Panics
    ///
    /// On a coordinate outside the grid. Callers only ever pass coordinates
    /// derived from the grid itself; use `try_set_focus` for anything else.
    pub fn set_focus(&mut self, x: usize, y: usize) {
        if let Err(e) = self.try_set_focus(x, y) {
            error!("{}", e);
            panic!("{}", e);
        }
    }

    /// Move focus to `(x, y)`, leaving everything untouched on error.
    pub fn try_set_focus(&mut self, x: usize, y: usize) -> Result<(), LayoutError> {
        if x >= self.col_count || y >= self.row_count {
            return Err(LayoutError::OutOfBounds {
                x,
                y,
                columns: self.col_count,
                rows: self.row_count,
            });
        }

        let (old_x, old_y) = self.active;
        if let Some(previous) = self.get_mut(old_x, old_y) {
            previous.unset_active();
        }
        if let Some(next) = self.get_mut(x, y) {
            next.set_active();
        }
        self.active = (x, y);
        debug!("Focus moved from ({}, {}) to ({}, {})", old_x, old_y, x, y);
        Ok(())
    }

    pub fn navigate_up(&mut self) -> bool {
        self.navigate(Direction::Up)
    }

    pub fn navigate_down(&mut self) -> bool {
        self.navigate(Direction::Down)
    }

    pub fn navigate_left(&mut self) -> bool {
        self.navigate(Direction::Left)
    }

    pub fn navigate_right(&mut self) -> bool {
        self.navigate(Direction::Right)
    }

    /// Move focus to the nearest selectable element in `direction`.
    ///
    /// Lines (rows for vertical moves, columns for horizontal ones) are tried
    /// one by one moving away from the focus. Within a line the element
    /// closest to the current column/row wins, looking on both sides. Returns
    /// whether focus moved; at an edge, or with nothing selectable further
    /// on, nothing changes.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let Some((x, y)) = self.active_position() else {
            return false;
        };

        let target = match direction {
            Direction::Up => (0..y)
                .rev()
                .find_map(|ny| self.nearest_in_row(ny, x).map(|nx| (nx, ny))),
            Direction::Down => (y + 1..self.row_count)
                .find_map(|ny| self.nearest_in_row(ny, x).map(|nx| (nx, ny))),
            Direction::Left => (0..x)
                .rev()
                .find_map(|nx| self.nearest_in_col(nx, y).map(|ny| (nx, ny))),
            Direction::Right => (x + 1..self.col_count)
                .find_map(|nx| self.nearest_in_col(nx, y).map(|ny| (nx, ny))),
        };

        match target {
            Some((nx, ny)) => {
                self.set_focus(nx, ny);
                true
            }
            None => {
                debug!("No selectable element {:?} of ({}, {})", direction, x, y);
                false
            }
        }
    }

    fn nearest_in_row(&self, y: usize, anchor: usize) -> Option<usize> {
        let row = &self.rows[y];
        nearest_selectable(anchor, self.col_count, |x| {
            row.get(x).is_some_and(PositionalElement::is_selectable)
        })
    }

    fn nearest_in_col(&self, x: usize, anchor: usize) -> Option<usize> {
        nearest_selectable(anchor, self.row_count, |y| {
            self.get(x, y).is_some_and(PositionalElement::is_selectable)
        })
    }

    /// Store new dimensions and re-resolve every row's widths.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        for row in &mut self.rows {
            row.resize(width);
        }
    }

    /// Rows stacked top to bottom; rows with nothing to show are skipped.
    pub fn render(&self, session: &Session) -> Text<'static> {
        join_vertical(
            self.rows
                .iter()
                .filter_map(|row| row.render(session))
                .collect(),
        )
    }
}

/// Index of the selectable slot closest to `anchor` in a line of `len` slots.
///
/// Offsets grow from 0; at each offset the lower index is tried before the
/// higher one.
fn nearest_selectable(
    anchor: usize,
    len: usize,
    is_selectable: impl Fn(usize) -> bool,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let anchor = anchor.min(len - 1);
    if is_selectable(anchor) {
        return Some(anchor);
    }

    let max_offset = anchor.max(len - 1 - anchor);
    for offset in 1..=max_offset {
        if offset <= anchor && is_selectable(anchor - offset) {
            return Some(anchor - offset);
        }
        let upper = anchor + offset;
        if upper < len && is_selectable(upper) {
            return Some(upper);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{EventLog, Probe, event_log, plain, test_session};
    use crate::tui::event::TuiEvent;
    use ratatui::layout::Alignment;

    fn probe(name: &str, log: &EventLog) -> PositionalElement {
        PositionalElement::fixed(Probe::new(name, log), Alignment::Left, 2)
    }

    fn empty() -> PositionalElement {
        PositionalElement::empty()
    }

    fn active_count(grid: &Grid) -> usize {
        grid.rows()
            .iter()
            .flat_map(|row| row.elements())
            .filter(|el| el.is_active())
            .count()
    }

    /// A  .  B
    /// .  .  .
    /// C  D  .
    fn sparse_grid(log: &EventLog) -> Grid {
        let mut grid = Grid::new(vec![
            Row::new(vec![probe("A", log), empty(), probe("B", log)]),
            Row::new(vec![empty(), empty(), empty()]),
            Row::new(vec![probe("C", log), probe("D", log), empty()]),
        ])
        .unwrap();
        grid.init(&test_session());
        grid
    }

    #[test]
    fn test_unequal_rows_rejected() {
        let log = event_log();
        let result = Grid::new(vec![
            Row::new(vec![probe("A", &log), empty()]),
            Row::new(vec![probe("B", &log)]),
        ]);
        assert_eq!(
            result.err(),
            Some(LayoutError::UnequalRows {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_dimensions() {
        let log = event_log();
        let grid = sparse_grid(&log);
        assert_eq!(grid.col_count(), 3);
        assert_eq!(grid.row_count(), 3);
    }

    #[test]
    fn test_degenerate_grid_is_inert() {
        let session = test_session();
        let mut grid = Grid::new(vec![]).unwrap();
        assert!(grid.init(&session).is_empty());
        assert!(grid.active().is_none());
        assert!(!grid.navigate_down());
        assert!(!grid.navigate_right());
        assert!(grid.update_active(&Msg::Input(TuiEvent::Enter), &session).is_none());
        assert_eq!(grid.try_set_focus(0, 0).unwrap_err(), LayoutError::OutOfBounds {
            x: 0,
            y: 0,
            columns: 0,
            rows: 0
        });

        let mut zero_width = Grid::new(vec![Row::new(vec![]), Row::new(vec![])]).unwrap();
        assert!(zero_width.is_degenerate());
        assert!(!zero_width.navigate_up());
    }

    #[test]
    fn test_init_calls_every_widget_once_and_focuses_origin() {
        let log = event_log();
        let grid = sparse_grid(&log);
        let inits: Vec<String> = log
            .borrow()
            .iter()
            .filter(|e| e.starts_with("init"))
            .cloned()
            .collect();
        assert_eq!(inits, ["init:A", "init:B", "init:C", "init:D"]);
        assert_eq!(grid.active_position(), Some((0, 0)));
        assert!(grid.get(0, 0).unwrap().is_active());
        assert_eq!(active_count(&grid), 1);
    }

    #[test]
    fn test_init_collects_widget_actions() {
        let log = event_log();
        let mut grid = Grid::new(vec![Row::new(vec![
            PositionalElement::fixed(
                Probe::new("A", &log).init_with(Action::LanguagesRequested),
                Alignment::Left,
                1,
            ),
            probe("B", &log),
        ])])
        .unwrap();
        assert_eq!(grid.init(&test_session()), vec![Action::LanguagesRequested]);
    }

    #[test]
    fn test_navigate_skips_empty_rows() {
        let log = event_log();
        let mut grid = sparse_grid(&log);
        assert!(grid.navigate_down());
        assert_eq!(grid.active_position(), Some((0, 2)));
        assert!(grid.navigate_up());
        assert_eq!(grid.active_position(), Some((0, 0)));
    }

    #[test]
    fn test_navigate_picks_nearest_column_lower_first() {
        let log = event_log();
        let mut grid = sparse_grid(&log);
        // From B at (2, 0): row 2 has C at 0 and D at 1; D is nearest to column 2
        grid.set_focus(2, 0);
        assert!(grid.navigate_down());
        assert_eq!(grid.active_position(), Some((1, 2)));

        // From D at (1, 2): row 0 has A at 0 and B at 2, equally near; lower index wins
        assert!(grid.navigate_up());
        assert_eq!(grid.active_position(), Some((0, 0)));
    }

    #[test]
    fn test_navigate_horizontal_searches_whole_column() {
        let log = event_log();
        let mut grid = sparse_grid(&log);
        assert!(grid.navigate_right());
        // Column 1 only has D; column 1 is tried before column 2
        assert_eq!(grid.active_position(), Some((1, 2)));
        assert!(grid.navigate_right());
        assert_eq!(grid.active_position(), Some((2, 0)));
        assert!(!grid.navigate_right());
        assert!(grid.navigate_left());
        assert_eq!(grid.active_position(), Some((1, 2)));
    }

    #[test]
    fn test_diagonal_grid_reaches_b() {
        // [[A, Empty], [Empty, B]]
        let log = event_log();
        let mut grid = Grid::new(vec![
            Row::new(vec![probe("A", &log), empty()]),
            Row::new(vec![empty(), probe("B", &log)]),
        ])
        .unwrap();
        grid.init(&test_session());

        assert!(grid.navigate_down());
        assert_eq!(grid.active_position(), Some((1, 1)));
        assert!(!grid.navigate_right());
        assert_eq!(grid.active_position(), Some((1, 1)));
        assert!(grid.get(1, 1).unwrap().is_active());
        assert!(!grid.get(0, 0).unwrap().is_active());
    }

    #[test]
    fn test_navigate_at_edges_is_noop() {
        let log = event_log();
        let mut grid = sparse_grid(&log);
        log.borrow_mut().clear();

        assert!(!grid.navigate_up());
        assert!(!grid.navigate_left());
        assert_eq!(grid.active_position(), Some((0, 0)));
        assert!(grid.get(0, 0).unwrap().is_active());
        assert_eq!(active_count(&grid), 1);
        assert!(log.borrow().is_empty(), "no focus hooks should run");

        grid.set_focus(1, 2);
        assert!(!grid.navigate_down());
        assert_eq!(grid.active_position(), Some((1, 2)));
    }

    #[test]
    fn test_up_then_down_round_trip() {
        let log = event_log();
        let mut grid = Grid::new(vec![
            Row::new(vec![probe("a", &log), probe("b", &log), probe("c", &log)]),
            Row::new(vec![empty(), probe("e", &log), empty()]),
            Row::new(vec![probe("g", &log), probe("h", &log), probe("i", &log)]),
            Row::new(vec![probe("j", &log), empty(), probe("l", &log)]),
        ])
        .unwrap();
        grid.init(&test_session());

        for (x, y) in [(1, 1), (1, 2), (0, 3), (2, 3)] {
            grid.set_focus(x, y);
            grid.navigate_up();
            grid.navigate_down();
            assert_eq!(grid.active_position(), Some((x, y)), "from ({x}, {y})");
        }
    }

    #[test]
    fn test_non_selectable_start_is_left_on_first_move() {
        let log = event_log();
        let mut grid = Grid::new(vec![
            Row::new(vec![
                PositionalElement::fixed(Probe::new("t", &log), Alignment::Left, 1).not_selectable(),
                probe("b", &log),
            ]),
            Row::new(vec![probe("c", &log), empty()]),
        ])
        .unwrap();
        grid.init(&test_session());
        assert_eq!(grid.active_position(), Some((0, 0)));
        assert!(grid.navigate_right());
        assert_eq!(grid.active_position(), Some((1, 0)));
        assert!(!grid.get(0, 0).unwrap().is_active());
        assert_eq!(active_count(&grid), 1);
    }

    #[test]
    fn test_not_selectable_cells_are_skipped() {
        let log = event_log();
        let mut grid = Grid::new(vec![Row::new(vec![
            probe("a", &log),
            PositionalElement::fixed(Probe::new("|", &log), Alignment::Center, 3).not_selectable(),
            probe("c", &log),
        ])])
        .unwrap();
        grid.init(&test_session());
        assert!(grid.navigate_right());
        assert_eq!(grid.active_position(), Some((2, 0)));
    }

    #[test]
    fn test_set_focus_moves_single_active_flag() {
        let log = event_log();
        let mut grid = sparse_grid(&log);
        grid.set_focus(1, 2);
        assert!(grid.get(1, 2).unwrap().is_active());
        assert!(!grid.get(0, 0).unwrap().is_active());
        assert_eq!(active_count(&grid), 1);

        // Refocusing the same cell keeps it active
        grid.set_focus(1, 2);
        assert!(grid.get(1, 2).unwrap().is_active());
        assert_eq!(active_count(&grid), 1);
    }

    #[test]
    fn test_out_of_bounds_focus_leaves_state_unchanged() {
        let log = event_log();
        let mut grid = sparse_grid(&log);
        grid.set_focus(2, 0);
        log.borrow_mut().clear();

        let err = grid.try_set_focus(3, 0).unwrap_err();
        assert!(matches!(err, LayoutError::OutOfBounds { x: 3, y: 0, .. }));
        assert!(grid.try_set_focus(0, 7).is_err());

        assert_eq!(grid.active_position(), Some((2, 0)));
        assert!(grid.get(2, 0).unwrap().is_active());
        assert_eq!(active_count(&grid), 1);
        assert!(log.borrow().is_empty());
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_set_focus_out_of_bounds_panics() {
        let log = event_log();
        let mut grid = sparse_grid(&log);
        grid.set_focus(0, 3);
    }

    #[test]
    fn test_update_active_only_reaches_focused_widget() {
        let log = event_log();
        let session = test_session();
        let mut grid = sparse_grid(&log);
        grid.set_focus(2, 0);
        log.borrow_mut().clear();

        grid.update_active(&Msg::Input(TuiEvent::Enter), &session);
        assert_eq!(log.borrow().as_slice(), ["update:B"]);
    }

    #[test]
    fn test_update_active_returns_widget_action() {
        let log = event_log();
        let session = test_session();
        let mut grid = Grid::new(vec![Row::new(vec![PositionalElement::fixed(
            Probe::new("go", &log).emitting(Action::TranslateButtonPressed),
            Alignment::Left,
            2,
        )])])
        .unwrap();
        grid.init(&session);
        assert_eq!(
            grid.update_active(&Msg::Input(TuiEvent::Enter), &session),
            Some(Action::TranslateButtonPressed)
        );
    }

    #[test]
    fn test_update_all_row_major_once_each() {
        let log = event_log();
        let session = test_session();
        let mut grid = Grid::new(vec![
            Row::new(vec![probe("A", &log), probe("B", &log)]),
            Row::new(vec![empty(), probe("C", &log)]),
        ])
        .unwrap();
        grid.init(&session);
        grid.set_focus(1, 1);
        log.borrow_mut().clear();

        let actions = grid.update_all(&Msg::Notify(Action::LanguagesReceived), &session);
        assert!(actions.is_empty());
        assert_eq!(log.borrow().as_slice(), ["update:A", "update:B", "update:C"]);
    }

    #[test]
    fn test_resize_cascades_to_rows_and_widgets() {
        let log = event_log();
        let mut grid = Grid::new(vec![
            Row::new(vec![
                PositionalElement::fixed(Probe::new("a", &log), Alignment::Left, 10),
                PositionalElement::empty(),
                PositionalElement::fill_auto(Probe::new("b", &log), Alignment::Left),
                PositionalElement::fill_auto(Probe::new("c", &log), Alignment::Left),
            ]),
        ])
        .unwrap();
        grid.resize(50, 12);
        assert_eq!(grid.size(), (50, 12));
        assert_eq!(grid.rows()[0].width(), 50);
        assert_eq!(
            log.borrow().as_slice(),
            ["width:a:10", "width:b:20", "width:c:20"]
        );
    }

    #[test]
    fn test_render_skips_empty_rows() {
        let log = event_log();
        let session = test_session();
        let mut grid = sparse_grid(&log);
        grid.resize(6, 3);
        assert_eq!(plain(&grid.render(&session)), "A B \nC D ");
    }

    fn only(set: &'static [usize]) -> impl Fn(usize) -> bool {
        move |i| set.contains(&i)
    }

    #[test]
    fn test_nearest_selectable_scan_order() {
        assert_eq!(nearest_selectable(2, 5, only(&[2])), Some(2));
        assert_eq!(nearest_selectable(2, 5, only(&[1, 3])), Some(1));
        assert_eq!(nearest_selectable(2, 5, only(&[4])), Some(4));
        assert_eq!(nearest_selectable(0, 5, only(&[4])), Some(4));
        assert_eq!(nearest_selectable(4, 5, only(&[0])), Some(0));
        assert_eq!(nearest_selectable(1, 3, only(&[])), None);
        assert_eq!(nearest_selectable(0, 0, only(&[0])), None);
    }
}
