//! Error types for quiz-core.

use thiserror::Error;

/// Result type alias using ConvertError.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors that can occur while converting a document.
///
/// Text that does not follow the quiz convention is never an error; only an
/// unreadable document is.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("invalid document archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("missing document part: {0}")]
    MissingPart(String),

    #[error("malformed document XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
