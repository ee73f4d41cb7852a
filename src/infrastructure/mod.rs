//! Infrastructure layer providing external service integrations.
//!
//! This module contains the implementations of the coordinator's ports
//! (profile sources, preference storage, fragment history) along with
//! configuration loading, CSV export and clipboard access.

pub mod clipboard;
pub mod config;
pub mod data_source;
pub mod export;
pub mod navigation;
pub mod persistence;

pub use clipboard::*;
pub use config::*;
pub use data_source::*;
pub use export::*;
pub use navigation::*;
pub use persistence::*;
