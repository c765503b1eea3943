//! SystemClipboard trait — plain-text clipboard read/write abstraction.

use std::sync::Mutex;

use async_trait::async_trait;

use super::ResolverError;

/// Reads and writes the system clipboard as plain text.
///
/// Both calls are asynchronous and fail independently. A host may expose
/// a clipboard object that lacks one of the calls; `can_read()` and
/// `can_write()` report that, and callers skip the operation entirely
/// instead of calling and failing.
///
/// `Send + Sync` is required because handlers holding the clipboard run
/// as `Send` futures on the host's executor.
#[async_trait]
pub trait SystemClipboard: Send + Sync {
    /// Read the current clipboard text.
    async fn read_text(&self) -> Result<String, ResolverError>;

    /// Replace the clipboard content with `text`.
    async fn write_text(&self, text: &str) -> Result<(), ResolverError>;

    /// Whether `read_text` is implemented by this host.
    fn can_read(&self) -> bool {
        true
    }

    /// Whether `write_text` is implemented by this host.
    fn can_write(&self) -> bool {
        true
    }
}

/// In-process clipboard holding a single text slot.
///
/// Used by the console driver when no X11 clipboard is wanted.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    content: Mutex<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clipboard pre-filled with `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: Mutex::new(text.into()),
        }
    }

    /// Current content.
    pub fn text(&self) -> String {
        self.content
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl SystemClipboard for MemoryClipboard {
    async fn read_text(&self) -> Result<String, ResolverError> {
        Ok(self.text())
    }

    async fn write_text(&self, text: &str) -> Result<(), ResolverError> {
        *self.content.lock().unwrap_or_else(|e| e.into_inner()) = text.to_owned();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_clipboard_starts_empty() {
        let clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.read_text().await.unwrap(), "");
    }

    #[tokio::test]
    async fn memory_clipboard_write_replaces_content() {
        let clipboard = MemoryClipboard::with_text("old");
        clipboard.write_text("new").await.unwrap();
        assert_eq!(clipboard.read_text().await.unwrap(), "new");
        assert_eq!(clipboard.text(), "new");
    }

    #[test]
    fn memory_clipboard_supports_both_directions() {
        let clipboard = MemoryClipboard::new();
        assert!(clipboard.can_read());
        assert!(clipboard.can_write());
    }
}
