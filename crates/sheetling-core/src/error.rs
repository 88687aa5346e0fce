//! Error types for sheetling core.

use thiserror::Error;

use sheetling_engine::engine::FormatError;

/// Errors that can occur in document and storage operations.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("unsupported file format (expected .csv): {0}")]
    UnsupportedFormat(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("no file path set")]
    NoFilePath,
}

pub type Result<T> = std::result::Result<T, SheetError>;
