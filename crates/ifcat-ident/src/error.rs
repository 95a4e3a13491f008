//! Error types for the ifcat-ident crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while probing or fingerprinting a story file.
///
/// Identification is best-effort: the registry layer converts these into an
/// absent identifier and logs the cause, so callers scanning a directory of
/// mixed files never see a hard failure for a file that simply is not a
/// recognized story.
#[derive(Debug, Error)]
pub enum IdentError {
    /// Underlying I/O error
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// File does not exist
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Header is smaller than the fixed prefix the format requires
    #[error("header too short: need {needed} bytes, got {got}")]
    TooShort { needed: usize, got: usize },

    /// Header bytes do not match the format signature
    #[error("not a recognized {format} file")]
    UnrecognizedFormat { format: &'static str },

    /// Version field did not decode as a decimal integer
    #[error("version field is not a decimal integer")]
    BadVersionDigits,

    /// A header field points outside the file
    #[error("description block at offset {offset} is out of bounds (file length {len})")]
    BlockOutOfBounds { offset: i64, len: u64 },
}

/// Result type for identification operations.
pub type Result<T> = std::result::Result<T, IdentError>;
