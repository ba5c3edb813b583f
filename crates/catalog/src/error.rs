//! Catalog Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. See `ERRORS.md` for design rationale.

use derive_more::{Display, Error};
use std::io::Error as IoError;
use std::path::PathBuf;

/// A catalog error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong
/// internally. Everything here is fatal to the operation that raised it;
/// conditions the caller recovers from locally (validation refusals,
/// lookups that find nothing) are reported as [`crate::Outcome`] values
/// and never pass through this type.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The document exists but could not be parsed as a catalog.
    #[display("catalog document is corrupt: {}", _0.display())]
    CorruptCatalog(#[error(not(source))] PathBuf),
    /// The in-memory collection could not be serialized for writing.
    #[display("failed to serialize catalog for {}", _0.display())]
    Persist(#[error(not(source))] PathBuf),
    /// Underlying I/O error while reading or replacing the document.
    #[display("I/O error: {_0}")]
    Io(IoError),
    /// A search field name that is not a book attribute.
    #[display("unknown search field: {_0}")]
    UnknownSearchField(#[error(not(source))] String),
    /// A status token outside the two-valued vocabulary.
    #[display("unknown status: {_0}")]
    UnknownStatus(#[error(not(source))] String),
}
impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
