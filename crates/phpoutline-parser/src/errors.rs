use phpoutline_model::ModelError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during scanning
#[derive(Error, Debug)]
pub enum ParserError {
    /// Failed to read file
    #[error("IO error reading {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    /// File too large
    #[error("File {0} exceeds maximum size ({1} bytes)")]
    FileTooLarge(PathBuf, usize),

    /// A structural invariant was violated while building entities
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for parser operations
pub type ParserResult<T> = Result<T, ParserError>;
