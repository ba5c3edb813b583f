use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use super::sanitize;
use crate::error::{Error, ErrorKind};

/// Availability of a catalogued book.
///
/// Serialized with the exact tokens `"available"` and `"checked_out"`.
/// There is no state machine behind this; any book may move between the
/// two values freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    /// On the shelf, ready to be borrowed.
    #[default]
    Available,
    /// Out with a reader.
    CheckedOut,
}

impl BookStatus {
    /// Returns the canonical token for the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::CheckedOut => "checked_out",
        }
    }
}

impl FromStr for BookStatus {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sanitized = sanitize(s);
        Ok(match sanitized.as_str() {
            "available" => Self::Available,
            "checkedout" => Self::CheckedOut,
            _ => exn::bail!(ErrorKind::UnknownStatus(s.to_string())),
        })
    }
}

impl Display for BookStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
