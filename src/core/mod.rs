//! # Core Application Logic
//!
//! This module contains tolk's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Session (state)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │   DeepL    │
//!             │  Adapter   │          │   client   │
//!             │ (ratatui)  │          │ (reqwest)  │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `Session` struct, shared read state for every screen
//! - [`action`]: The `Action` enum and the `update` reducer
//! - [`config`]: Config file and override resolution
//! - [`credentials`]: The saved API key (file I/O, called from the event loop only)

pub mod action;
pub mod config;
pub mod credentials;
pub mod state;
