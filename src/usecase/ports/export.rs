#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    Message(String),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Message(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ExportError {}

/// Saves exported text under a file name chosen by the caller.
pub trait FileSink {
    fn save_text(&self, file_name: &str, content: &str) -> Result<(), ExportError>;
}

/// Writes a text string to the system clipboard.
pub trait ClipboardSink {
    fn copy_text(&self, text: &str) -> Result<(), ExportError>;
}
