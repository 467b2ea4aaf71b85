use crate::usecase::ports::export::{ClipboardSink, ExportError};

/// System clipboard backed by arboard. A fresh handle is opened per write;
/// failures are surfaced as errors, never panics.
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn copy_text(&self, text: &str) -> Result<(), ExportError> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|err| ExportError::Message(format!("clipboard unavailable: {err}")))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|err| ExportError::Message(format!("clipboard write failed: {err}")))
    }
}
