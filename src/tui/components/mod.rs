//! # TUI Components
//!
//! ## Grid widgets
//!
//! Implement `layout::Widget` and live inside a screen's grid:
//! - `Button`: `label: value`, Enter emits its action
//! - `TextArea`: source (editable) and target (read-only) panes
//! - `Delimiter`: rule between the panes
//! - `Picker`: filterable list of languages or formality levels
//! - `KeyInput`: masked API key field
//! - `ErrorMessage`: body of the error screen
//!
//! ## Frame chrome
//!
//! Implement `component::Component` and are drawn around the grid:
//! - `Header`: title, status, version
//! - `HelpBar`: key hints
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── button.rs
//! ├── text_area/       (panes + wrapping helpers)
//! ├── delimiter.rs
//! ├── picker.rs
//! ├── key_input.rs
//! ├── error_message.rs
//! ├── header.rs
//! └── help_bar.rs
//! ```

mod button;
mod delimiter;
mod error_message;
mod header;
mod help_bar;
mod key_input;
mod picker;
mod text_area;

pub use button::Button;
pub use delimiter::Delimiter;
pub use error_message::ErrorMessage;
pub use header::Header;
pub use help_bar::HelpBar;
pub use key_input::KeyInput;
pub use picker::{Picker, PickerKind};
pub use text_area::{TextArea, text_area_height};
