use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::BookStatus;

/// One catalogued book.
///
/// Identity is the `id` field; no two records in a catalog share one. The
/// text fields are stored verbatim as entered. Two records describe the
/// same book when title, author and year all match exactly, which is the
/// uniqueness rule enforced on add.
///
/// The serialized form is a plain mapping with the keys
/// `id, title, author, year, status`, values copied field-for-field. A
/// record missing any of those keys fails to deserialize; unknown extra
/// keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique, sequentially assigned identifier. Never reassigned once taken.
    pub id: u64,
    pub title: String,
    pub author: String,
    /// Publication year.
    pub year: i32,
    /// Whether the book is on the shelf or out with a reader.
    pub status: BookStatus,
}

impl Book {
    /// Create a fresh record. New books always start out available.
    pub fn new(id: u64, title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
            status: BookStatus::Available,
        }
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}: {} by {}, {} ({})", self.id, self.title, self.author, self.year, self.status)
    }
}
