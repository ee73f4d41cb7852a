//! Application layer managing view state and workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! it owns the view-state coordinator, its injected ports, the typed event
//! vocabulary and the periodic refresh machinery.

pub mod events;
pub mod ports;
pub mod refresh;
pub mod state;
pub mod view_state;

pub use events::*;
pub use ports::*;
pub use refresh::*;
pub use state::*;
pub use view_state::*;
