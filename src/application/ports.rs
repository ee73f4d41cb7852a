//! Collaborators injected into the coordinator.
//!
//! The coordinator never touches the network, the filesystem or the
//! navigation history directly; it goes through these traits so that the
//! terminal front end and the tests can supply their own implementations.

use crate::domain::{DirectoryData, DomainResult};

/// Fetches the static profile collection.
///
/// Implementations are shared with the refresh worker thread, hence the
/// `Send + Sync` bound.
pub trait ProfileSource: Send + Sync {
    /// Human-readable location, used in logs and error messages.
    fn location(&self) -> &str;

    fn fetch(&self) -> DomainResult<DirectoryData>;
}

/// Key/value store for boolean display preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<bool>;

    /// Writes through immediately; there is no buffering.
    fn set(&mut self, key: &str, value: bool) -> DomainResult<()>;
}

/// Fragment history, the sole source of truth for route state.
pub trait Navigator {
    /// Current fragment without the leading `#`.
    fn current(&self) -> &str;

    /// Adds a new history entry, discarding any forward entries.
    fn push(&mut self, fragment: &str);

    /// Overwrites the current history entry.
    fn replace(&mut self, fragment: &str);

    /// Returns `false` when already at the oldest entry.
    fn back(&mut self) -> bool;

    /// Returns `false` when already at the newest entry.
    fn forward(&mut self) -> bool;
}

/// Destination for copied text.
///
/// Implementations must stay alive for as long as the copied text should
/// remain available; on X11 and Wayland the owner serves the selection.
pub trait ClipboardSink {
    /// # Errors
    ///
    /// Returns [`DomainError::Clipboard`](crate::domain::DomainError::Clipboard)
    /// when no clipboard is available or the write is rejected.
    fn set_text(&mut self, text: &str) -> DomainResult<()>;
}
