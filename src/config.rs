use std::path::{Path, PathBuf};

const DEFAULT_LOG_FILE: &str = "logs/route_notes.log";

/// Where the rolling JSON log is written.
///
/// Read from `LOG_FILE_PATH`, which may also come from a `.env` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub directory: PathBuf,
    pub file_name: String,
}

impl LogConfig {
    pub fn from_env() -> Self {
        let path = std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        Self::from_path(&path)
    }

    /// Splits a log file path into directory and file name, falling back to
    /// the defaults for whichever part is missing.
    pub fn from_path(path: &str) -> Self {
        let path = Path::new(path);
        let directory = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("logs"))
            .to_path_buf();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "route_notes.log".to_string());

        Self {
            directory,
            file_name,
        }
    }
}
