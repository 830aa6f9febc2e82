//! OS clipboard through arboard.

use log::warn;

use imbridge_core::ClipboardBackend;

/// The system clipboard.
///
/// Failures are logged and otherwise ignored: a read that fails returns
/// nothing and a write that fails leaves the clipboard unchanged.
pub struct ArboardClipboard {
    clipboard: arboard::Clipboard,
}

impl ArboardClipboard {
    /// Connects to the system clipboard.
    pub fn new() -> Result<Self, arboard::Error> {
        Ok(Self {
            clipboard: arboard::Clipboard::new()?,
        })
    }

    /// Connects to the system clipboard, logging instead of failing.
    pub fn try_new() -> Option<Self> {
        match Self::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                warn!("clipboard unavailable: {e}");
                None
            }
        }
    }
}

impl ClipboardBackend for ArboardClipboard {
    fn get(&mut self) -> Option<String> {
        match self.clipboard.get_text() {
            Ok(text) => Some(text),
            Err(arboard::Error::ContentNotAvailable) => None,
            Err(e) => {
                warn!("failed to read clipboard: {e}");
                None
            }
        }
    }

    fn set(&mut self, text: &str) {
        if let Err(e) = self.clipboard.set_text(text) {
            warn!("failed to write clipboard: {e}");
        }
    }
}
