use std::io;
use std::path::PathBuf;

use thiserror::Error;

use visium_core::errors::FileLookupError;

/// Error type for the feature-barcode matrix and probe set loaders.
#[derive(Error, Debug)]
pub enum ScError {
    /// The path handed to the matrix loader is not a directory.
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// One of the matrix files could not be located.
    #[error(transparent)]
    Lookup(#[from] FileLookupError),

    /// Malformed MatrixMarket content.
    #[error("Invalid MatrixMarket file at line {line}: {msg}")]
    MatrixMarket { line: usize, msg: String },

    /// Well-formed MatrixMarket banner describing a layout we don't read.
    #[error("Unsupported MatrixMarket format: {0}")]
    UnsupportedMatrixFormat(String),

    #[error("Feature line {line} has {found} fields, expected 3 (feature_id, gene, feature_type)")]
    FeatureFieldCount { line: u64, found: usize },

    /// Matrix shape disagrees with the number of features or barcodes.
    #[error("Matrix expects {expected} {axis} labels but {found} were read")]
    DimensionMismatch {
        axis: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Probe set is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Probe set line {line}: '{value}' is not a boolean 'included' value")]
    InvalidIncluded { line: u64, value: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type alias for visium-sc operations.
pub type Result<T> = std::result::Result<T, ScError>;
