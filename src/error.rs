use std::io;

use thiserror::Error;

/// Error type for route file loading, analysis, and assignment failures.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid file type: {0}")]
    InvalidFileType(String),
    #[error("no \"Note\" column found in the CSV file")]
    NoNoteColumn,
    #[error("invalid assignment: {0}")]
    InvalidAssignment(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}
