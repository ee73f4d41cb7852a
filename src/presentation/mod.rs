//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the directory with ratatui and turns crossterm key
//! presses into coordinator calls and typed events. It owns no business
//! logic of its own.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
