use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use super::{Book, sanitize};
use crate::error::{Error, ErrorKind};

/// A searchable attribute of a [`Book`].
///
/// This is a closed mapping from field name to extraction function: a name
/// that is not one of the five attributes is rejected at parse time rather
/// than silently matching nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Id,
    Title,
    Author,
    Year,
    Status,
}

impl SearchField {
    /// Returns the field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Id => "id",
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Year => "year",
            SearchField::Status => "status",
        }
    }

    /// Extract this attribute of a book as text, for substring matching.
    pub fn extract(&self, book: &Book) -> String {
        match self {
            SearchField::Id => book.id.to_string(),
            SearchField::Title => book.title.clone(),
            SearchField::Author => book.author.clone(),
            SearchField::Year => book.year.to_string(),
            SearchField::Status => book.status.as_str().to_string(),
        }
    }
}

impl FromStr for SearchField {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sanitized = sanitize(s);
        Ok(match sanitized.as_str() {
            "id" => Self::Id,
            "title" => Self::Title,
            "author" => Self::Author,
            "year" => Self::Year,
            "status" => Self::Status,
            _ => exn::bail!(ErrorKind::UnknownSearchField(s.to_string())),
        })
    }
}

impl Display for SearchField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
