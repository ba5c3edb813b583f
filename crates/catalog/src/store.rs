//! Catalog document storage.
//!
//! The whole catalog is persisted as a single human-readable JSON document:
//! an ordered sequence of book records, UTF-8, with non-ASCII content
//! written verbatim rather than escaped. Every save rewrites the entire
//! document; at the collection sizes this tool is built for, the full
//! rewrite is a deliberate trade of efficiency for simplicity.

use exn::ResultExt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::models::Book;

/// Store for the catalog document at a fixed location on disk.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    /// Create a store for the document at `path`. Nothing is read or
    /// created until [`load`](Self::load) or [`save`](Self::save) is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The storage location this store reads from and writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the persisted document.
    ///
    /// Returns `Ok(None)` if the document does not exist yet; a missing
    /// file is how a brand new catalog starts, not an error. A document
    /// that exists but cannot be parsed as a sequence of well-formed
    /// records raises [`ErrorKind::CorruptCatalog`], never a
    /// partially-parsed collection.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Option<Vec<Book>>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no catalog document found");
                return Ok(None);
            }
            Err(e) => exn::bail!(ErrorKind::Io(e)),
        };
        let books: Vec<Book> =
            serde_json::from_str(&raw).or_raise(|| ErrorKind::CorruptCatalog(self.path.clone()))?;
        tracing::debug!(books = books.len(), "catalog document loaded");
        Ok(Some(books))
    }

    /// Serialize the full collection and replace the document on disk.
    ///
    /// Writes to a temporary file in the destination directory and renames
    /// it over the old document, so a reader never observes a half-written
    /// file and a failed write leaves the previous document intact.
    #[instrument(skip(self, books), fields(path = %self.path.display(), count = books.len()))]
    pub fn save(&self, books: &[Book]) -> Result<()> {
        let json =
            serde_json::to_string_pretty(books).or_raise(|| ErrorKind::Persist(self.path.clone()))?;
        let dir = match self.path.parent() {
            // A bare file name like "library.json" has an empty parent.
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir).map_err(ErrorKind::Io)?;
        file.write_all(json.as_bytes()).map_err(ErrorKind::Io)?;
        file.persist(&self.path).map_err(|e| ErrorKind::Io(e.error))?;
        tracing::debug!("catalog document replaced");
        Ok(())
    }
}
