//! Error types for the ifcat-skein crate.

use thiserror::Error;

/// Errors raised while rendering a skein document.
///
/// A well-formed tree serializes without failure; these variants cover the
/// XML writer's surface and the final UTF-8 conversion.
#[derive(Debug, Error)]
pub enum SkeinError {
    /// XML writer error
    #[error("xml writer error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Underlying I/O error from the writer sink
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The rendered document was not valid UTF-8
    #[error("serialized document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for skein operations.
pub type Result<T> = std::result::Result<T, SkeinError>;
