//! # Layout
//!
//! Screens are grids of widgets. Every screen is built the same way:
//!
//! ```text
//! Grid
//! ├── Row ── PositionalElement(Fixed 10)  ── Box<dyn Widget>
//! │      ├── PositionalElement(Empty)
//! │      └── PositionalElement(FillAuto)  ── Box<dyn Widget>
//! └── Row ── ...
//! ```
//!
//! - **Sizing** decides how many columns an element gets (`Row::resize`).
//! - **Alignment** decides where the widget's content sits inside them.
//! - **Focus** belongs to exactly one element; arrow keys move it to the
//!   nearest selectable neighbour (`Grid::navigate`).
//!
//! Input goes to the focused widget only, notifications go to all of them.
//! Widgets answer with an optional `Action` which the host feeds to
//! `core::action::update`.

mod element;
mod grid;
mod place;
mod row;
mod widget;

pub use element::{PositionalElement, Sizing};
pub use grid::{Direction, Grid, LayoutError};
pub use place::{is_blank, join_horizontal, join_vertical, place_horizontal};
pub use row::Row;
pub use widget::{Msg, Widget};
