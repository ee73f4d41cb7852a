//! Smoelenboek - Terminal Profile Directory Library
//!
//! A searchable, filterable directory of student profiles with a tabbed
//! detail view and browser-style history, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
