use std::fs;
use std::path::PathBuf;

use directories::UserDirs;

use crate::usecase::ports::export::{ExportError, FileSink};

/// Writes exported text files into the user's Downloads directory, falling
/// back to the home directory when the platform has none.
pub struct DownloadsSink;

impl DownloadsSink {
    fn target_dir() -> Result<PathBuf, ExportError> {
        let user_dirs = UserDirs::new()
            .ok_or_else(|| ExportError::Message("unable to resolve user directories".to_string()))?;
        Ok(user_dirs
            .download_dir()
            .unwrap_or_else(|| user_dirs.home_dir())
            .to_path_buf())
    }
}

impl FileSink for DownloadsSink {
    fn save_text(&self, file_name: &str, content: &str) -> Result<(), ExportError> {
        let path = Self::target_dir()?.join(file_name);
        fs::write(&path, content)
            .map_err(|err| ExportError::Message(format!("failed to write {}: {err}", path.display())))
    }
}
