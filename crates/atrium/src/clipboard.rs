//! Clipboard access for text widgets.
//!
//! Text widgets cut, copy, and paste through the [`Clipboard`] trait on
//! their event context rather than talking to the platform directly. The
//! desktop starts with a process-local [`MemoryClipboard`]; hosts that want
//! OS integration install a [`SystemClipboard`] (behind the
//! `system-clipboard` feature) with
//! [`Desktop::with_clipboard`](crate::widget::Desktop::with_clipboard).

/// Text clipboard used by editing widgets.
pub trait Clipboard: Send {
    /// Get the current clipboard text, if any.
    fn get_text(&mut self) -> Option<String>;

    /// Replace the clipboard contents with the given text.
    fn set_text(&mut self, text: &str);

    /// Check whether the clipboard currently holds non-empty text.
    fn has_text(&mut self) -> bool {
        self.get_text().is_some_and(|text| !text.is_empty())
    }
}

/// In-process clipboard backed by a plain `String`.
///
/// The default backend. Cut/copy/paste work within the desktop but do not
/// reach other applications.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    /// Create an empty in-process clipboard.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
    }
}

/// Clipboard backed by the operating system.
#[cfg(feature = "system-clipboard")]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "system-clipboard")]
impl SystemClipboard {
    /// Open the system clipboard.
    pub fn new() -> crate::error::WidgetResult<Self> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| crate::error::WidgetError::ClipboardUnavailable(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[cfg(feature = "system-clipboard")]
impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.inner.get_text().ok()
    }

    fn set_text(&mut self, text: &str) {
        if let Err(e) = self.inner.set_text(text) {
            tracing::warn!("failed to write system clipboard: {e}");
        }
    }
}

#[cfg(feature = "system-clipboard")]
impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_round_trip() {
        let mut clipboard = MemoryClipboard::new();
        assert!(clipboard.get_text().is_none());
        assert!(!clipboard.has_text());

        clipboard.set_text("hello");
        assert_eq!(clipboard.get_text().as_deref(), Some("hello"));
        assert!(clipboard.has_text());
    }

    #[test]
    fn test_empty_text_is_not_has_text() {
        let mut clipboard = MemoryClipboard::new();
        clipboard.set_text("");
        assert!(clipboard.get_text().is_some());
        assert!(!clipboard.has_text());
    }
}
