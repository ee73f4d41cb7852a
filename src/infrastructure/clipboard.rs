use crate::application::ClipboardSink;
use crate::domain::{DomainError, DomainResult};
use arboard::Clipboard;

/// The system clipboard, opened once and held for the whole session.
///
/// On Linux the copied text is only served while the handle is alive, so
/// this is owned by the coordinator rather than created per copy.
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let clipboard = Clipboard::new().ok();
        if clipboard.is_none() {
            tracing::warn!("failed to initialize clipboard support");
        }
        Self { clipboard }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> DomainResult<()> {
        match self.clipboard.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .map_err(|e| DomainError::Clipboard(e.to_string())),
            None => Err(DomainError::Clipboard("no system clipboard".to_string())),
        }
    }
}
