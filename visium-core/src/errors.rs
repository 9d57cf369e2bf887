use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating a named file somewhere below a root directory.
#[derive(Error, Debug)]
pub enum FileLookupError {
    #[error("No file named '{filename}' found under {}", .root.display())]
    NotFound { root: PathBuf, filename: String },

    #[error("Found {} files named '{filename}' under {}: {candidates:?}", .candidates.len(), .root.display())]
    Ambiguous {
        root: PathBuf,
        filename: String,
        candidates: Vec<PathBuf>,
    },

    #[error("Invalid search pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
