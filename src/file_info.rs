//! Loading route exports from disk.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::RouteError;

/// Metadata about a loaded route file, shown alongside its analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub name: String,
    pub size_bytes: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

impl FileInfo {
    pub fn from_path(path: &Path) -> Result<Self, RouteError> {
        let metadata = fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(FileInfo {
            name,
            size_bytes: metadata.len(),
            last_modified: metadata.modified().ok().map(DateTime::<Utc>::from),
        })
    }
}

/// Reads a route export, rejecting anything that is not CSV text.
///
/// # Errors
///
/// Returns [`RouteError::InvalidFileType`] if the extension is not `csv` or
/// the content is not valid UTF-8, and [`RouteError::Io`] if reading fails.
pub fn read_route_file(path: &Path) -> Result<(FileInfo, String), RouteError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(RouteError::InvalidFileType(format!(
            "{} is not a .csv file",
            path.display()
        )));
    }

    let info = FileInfo::from_path(path)?;
    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|_| {
        RouteError::InvalidFileType(format!("{} is not valid UTF-8 text", path.display()))
    })?;

    debug!(file = %info.name, size = info.size_bytes, "Route file read");
    Ok((info, text))
}
