//! The in-memory catalog and its operations.

use std::path::Path;

use crate::consts::MAX_PUBLICATION_YEAR;
use crate::error::{ErrorKind, Result};
use crate::models::{Book, BookStatus, SearchField};
use crate::outcome::Outcome;
use crate::store::CatalogStore;

/// What to do with a catalog document that cannot be parsed.
///
/// The decision is injected by the caller (an interactive prompt, a
/// pre-supplied answer in tests) so that opening a library never has to
/// read from a terminal itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Discard the unreadable document and start with an empty catalog.
    Reinitialize,
    /// Give up and propagate the parse failure.
    Abort,
}

/// An ordered collection of [`Book`] records mirrored 1:1 with a persisted
/// JSON document.
///
/// The collection is loaded fully into memory on open, and every
/// successful mutation rewrites the whole document before its outcome is
/// reported, so memory and disk never drift apart. A failed persist is
/// fatal: the error propagates instead of letting the process carry on
/// with a view the document no longer matches.
#[derive(Debug)]
pub struct Library {
    store: CatalogStore,
    books: Vec<Book>,
    max_year: i32,
}

impl Library {
    /// Open the library backed by `store`.
    ///
    /// A missing document yields an empty catalog. A document that exists
    /// but cannot be parsed invokes `on_corrupt`: reinitializing starts
    /// empty (the document itself is only rewritten by the next successful
    /// mutation), aborting propagates the parse failure.
    pub fn open(store: CatalogStore, on_corrupt: impl FnOnce(&Path) -> Recovery) -> Result<Self> {
        let books = match store.load() {
            Ok(Some(books)) => books,
            Ok(None) => Vec::new(),
            Err(err) if matches!(&*err, ErrorKind::CorruptCatalog(_)) => {
                match on_corrupt(store.path()) {
                    Recovery::Reinitialize => {
                        tracing::warn!(path = %store.path().display(), "discarding corrupt catalog document");
                        Vec::new()
                    }
                    Recovery::Abort => return Err(err),
                }
            }
            Err(err) => return Err(err),
        };
        Ok(Self { store, books, max_year: MAX_PUBLICATION_YEAR })
    }

    /// Replace the default publication year cap (2024) with a configured one.
    pub fn with_max_year(mut self, max_year: i32) -> Self {
        self.max_year = max_year;
        self
    }

    /// The full current sequence, in add order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// An empty catalog is a distinct, reportable state.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Validate and add a new book, reporting the assigned id.
    ///
    /// Checks run in order and the first refusal wins: non-empty title,
    /// non-empty author, numeric year, year within range, and no existing
    /// book with the identical (title, author, year) triple. The triple
    /// comparison is exact and case-sensitive; the text fields themselves
    /// are stored verbatim as entered.
    pub fn add(&mut self, title: &str, author: &str, year_input: &str) -> Result<Outcome> {
        if title.trim().is_empty() {
            return Ok(Outcome::EmptyTitle);
        }
        if author.trim().is_empty() {
            return Ok(Outcome::EmptyAuthor);
        }
        let Ok(year) = year_input.trim().parse::<i32>() else {
            return Ok(Outcome::YearNotANumber);
        };
        if year < 0 || year > self.max_year {
            return Ok(Outcome::YearOutOfRange(self.max_year));
        }
        if self.books.iter().any(|b| b.title == title && b.author == author && b.year == year) {
            return Ok(Outcome::DuplicateBook);
        }

        let id = self.next_id();
        self.books.push(Book::new(id, title, author, year));
        self.persist()?;
        tracing::debug!(id, "book added");
        Ok(Outcome::Added(id))
    }

    /// Remove a book by id, asking `confirm` before touching anything.
    ///
    /// The confirmation is injected for the same reason as
    /// [`Recovery`]: removal is destructive, and the decision belongs to
    /// whoever is driving the library, not to the library itself.
    pub fn remove(&mut self, id_input: &str, confirm: impl FnOnce(&Book) -> bool) -> Result<Outcome> {
        if self.books.is_empty() {
            return Ok(Outcome::EmptyCatalog);
        }
        let id = match parse_id(id_input) {
            Ok(id) => id,
            Err(rejection) => return Ok(rejection),
        };
        let Some((position, book)) = self.books.iter().enumerate().find(|(_, b)| b.id == id) else {
            return Ok(Outcome::NotFound(id));
        };
        if !confirm(book) {
            return Ok(Outcome::RemovalCancelled);
        }
        self.books.remove(position);
        self.persist()?;
        tracing::debug!(id, "book removed");
        Ok(Outcome::Removed(id))
    }

    /// Overwrite the status field of the book with the given id.
    pub fn change_status(&mut self, id_input: &str, status_input: &str) -> Result<Outcome> {
        if self.books.is_empty() {
            return Ok(Outcome::EmptyCatalog);
        }
        let id = match parse_id(id_input) {
            Ok(id) => id,
            Err(rejection) => return Ok(rejection),
        };
        let Ok(status) = status_input.parse::<BookStatus>() else {
            return Ok(Outcome::InvalidStatus);
        };
        let Some(book) = self.books.iter_mut().find(|b| b.id == id) else {
            return Ok(Outcome::NotFound(id));
        };
        book.status = status;
        self.persist()?;
        tracing::debug!(id, status = %status, "book status changed");
        Ok(Outcome::StatusChanged(id, status))
    }

    /// First (and by the id invariant, only) book with this id.
    pub fn find_by_id(&self, id: u64) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Every book whose `field` text contains `value` as a
    /// case-insensitive substring, in catalog order.
    pub fn search(&self, field: SearchField, value: &str) -> Vec<&Book> {
        let needle = value.to_lowercase();
        self.books.iter().filter(|b| field.extract(b).to_lowercase().contains(&needle)).collect()
    }

    /// Ids are assigned sequentially from the current maximum, so a freed
    /// id below the maximum stays retired.
    fn next_id(&self) -> u64 {
        self.books.iter().map(|b| b.id).max().unwrap_or(0) + 1
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.books)
    }
}

/// Shared id parsing for the operations that take a raw id string.
fn parse_id(input: &str) -> std::result::Result<u64, Outcome> {
    let Ok(id) = input.trim().parse::<i64>() else {
        return Err(Outcome::IdNotANumber);
    };
    if id <= 0 {
        return Err(Outcome::IdNotPositive);
    }
    Ok(id as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::PathBuf;

    fn open_in(dir: &tempfile::TempDir) -> Library {
        let store = CatalogStore::new(dir.path().join("library.json"));
        Library::open(store, |_| Recovery::Abort).unwrap()
    }

    fn approve(_: &Book) -> bool {
        true
    }

    fn decline(_: &Book) -> bool {
        false
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = open_in(&dir);
        assert_eq!(library.add("Dune", "Frank Herbert", "1965").unwrap(), Outcome::Added(1));
        assert_eq!(library.add("Solaris", "Stanisław Lem", "1961").unwrap(), Outcome::Added(2));
        assert_eq!(library.len(), 2);
        assert_eq!(library.find_by_id(1).unwrap().status, BookStatus::Available);
    }

    #[test]
    fn test_add_duplicate_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = open_in(&dir);
        library.add("Dune", "Frank Herbert", "1965").unwrap();
        assert_eq!(library.add("Dune", "Frank Herbert", "1965").unwrap(), Outcome::DuplicateBook);
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_duplicate_check_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = open_in(&dir);
        library.add("Dune", "Frank Herbert", "1965").unwrap();
        // A different casing is a different book.
        assert_eq!(library.add("dune", "Frank Herbert", "1965").unwrap(), Outcome::Added(2));
    }

    #[rstest]
    #[case("", "Frank Herbert", "1965", Outcome::EmptyTitle)]
    #[case("   ", "Frank Herbert", "1965", Outcome::EmptyTitle)]
    #[case("Dune", "", "1965", Outcome::EmptyAuthor)]
    #[case("Dune", "  ", "1965", Outcome::EmptyAuthor)]
    #[case("Dune", "Frank Herbert", "next year", Outcome::YearNotANumber)]
    #[case("Dune", "Frank Herbert", "", Outcome::YearNotANumber)]
    #[case("Dune", "Frank Herbert", "-1", Outcome::YearOutOfRange(2024))]
    #[case("Dune", "Frank Herbert", "2025", Outcome::YearOutOfRange(2024))]
    // First refusal wins: bad title is reported before bad year.
    #[case("", "", "not a year", Outcome::EmptyTitle)]
    fn test_add_rejections_are_no_ops(
        #[case] title: &str,
        #[case] author: &str,
        #[case] year: &str,
        #[case] expected: Outcome,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let mut library = open_in(&dir);
        assert_eq!(library.add(title, author, year).unwrap(), expected);
        assert!(library.is_empty());
        // Nothing was persisted either.
        assert!(!dir.path().join("library.json").exists());
    }

    #[rstest]
    #[case("0")]
    #[case("2024")]
    fn test_add_accepts_year_bounds(#[case] year: &str) {
        let dir = tempfile::tempdir().unwrap();
        let mut library = open_in(&dir);
        assert_eq!(library.add("Dune", "Frank Herbert", year).unwrap(), Outcome::Added(1));
    }

    #[test]
    fn test_max_year_is_configurable() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = open_in(&dir).with_max_year(2030);
        assert_eq!(library.add("Dune", "Frank Herbert", "2030").unwrap(), Outcome::Added(1));
        assert_eq!(library.add("Dune", "Frank Herbert", "2031").unwrap(), Outcome::YearOutOfRange(2030));
    }

    #[test]
    fn test_freed_ids_below_the_maximum_stay_retired() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = open_in(&dir);
        library.add("Dune", "Frank Herbert", "1965").unwrap();
        library.add("Solaris", "Stanisław Lem", "1961").unwrap();
        library.add("Ubik", "Philip K. Dick", "1969").unwrap();
        library.remove("2", approve).unwrap();
        assert_eq!(library.add("Roadside Picnic", "Strugatsky", "1972").unwrap(), Outcome::Added(4));
    }

    #[test]
    fn test_remove_with_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = open_in(&dir);
        library.add("Dune", "Frank Herbert", "1965").unwrap();
        assert_eq!(library.remove("1", approve).unwrap(), Outcome::Removed(1));
        assert!(library.is_empty());
        assert!(library.find_by_id(1).is_none());
    }

    #[test]
    fn test_remove_declined_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = open_in(&dir);
        library.add("Dune", "Frank Herbert", "1965").unwrap();
        assert_eq!(library.remove("1", decline).unwrap(), Outcome::RemovalCancelled);
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_remove_passes_the_book_to_the_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = open_in(&dir);
        library.add("Dune", "Frank Herbert", "1965").unwrap();
        let mut seen = String::new();
        library
            .remove("1", |book| {
                seen = book.title.clone();
                false
            })
            .unwrap();
        assert_eq!(seen, "Dune");
    }

    #[test]
    fn test_remove_unknown_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = open_in(&dir);
        library.add("Dune", "Frank Herbert", "1965").unwrap();
        assert_eq!(library.remove("7", approve).unwrap(), Outcome::NotFound(7));
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_remove_from_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = open_in(&dir);
        assert_eq!(library.remove("1", approve).unwrap(), Outcome::EmptyCatalog);
    }

    #[rstest]
    #[case("one", Outcome::IdNotANumber)]
    #[case("", Outcome::IdNotANumber)]
    #[case("1.5", Outcome::IdNotANumber)]
    #[case("0", Outcome::IdNotPositive)]
    #[case("-3", Outcome::IdNotPositive)]
    fn test_remove_id_parsing(#[case] id: &str, #[case] expected: Outcome) {
        let dir = tempfile::tempdir().unwrap();
        let mut library = open_in(&dir);
        library.add("Dune", "Frank Herbert", "1965").unwrap();
        assert_eq!(library.remove(id, approve).unwrap(), expected);
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_change_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = open_in(&dir);
        library.add("Dune", "Frank Herbert", "1965").unwrap();
        library.add("Solaris", "Stanisław Lem", "1961").unwrap();
        let outcome = library.change_status("1", "checked_out").unwrap();
        assert_eq!(outcome, Outcome::StatusChanged(1, BookStatus::CheckedOut));
        assert_eq!(library.find_by_id(1).unwrap().status, BookStatus::CheckedOut);
        // Only the targeted book changes, and only its status field.
        let untouched = library.find_by_id(2).unwrap();
        assert_eq!(untouched.status, BookStatus::Available);
        assert_eq!(untouched.title, "Solaris");
    }

    #[test]
    fn test_change_status_invalid_value_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = open_in(&dir);
        library.add("Dune", "Frank Herbert", "1965").unwrap();
        assert_eq!(library.change_status("1", "lost").unwrap(), Outcome::InvalidStatus);
        assert_eq!(library.find_by_id(1).unwrap().status, BookStatus::Available);
    }

    #[test]
    fn test_change_status_unknown_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = open_in(&dir);
        library.add("Dune", "Frank Herbert", "1965").unwrap();
        assert_eq!(library.change_status("5", "checked_out").unwrap(), Outcome::NotFound(5));
    }

    #[test]
    fn test_change_status_on_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = open_in(&dir);
        assert_eq!(library.change_status("1", "checked_out").unwrap(), Outcome::EmptyCatalog);
    }

    #[test]
    fn test_search_author_is_case_insensitive_substring() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = open_in(&dir);
        library.add("Dune", "Frank Herbert", "1965").unwrap();
        library.add("Solaris", "Stanisław Lem", "1961").unwrap();
        library.add("Dune Messiah", "Frank Herbert", "1969").unwrap();
        let found = library.search(SearchField::Author, "herbert");
        assert_eq!(found.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_search_year_and_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = open_in(&dir);
        library.add("Dune", "Frank Herbert", "1965").unwrap();
        library.add("Solaris", "Stanisław Lem", "1961").unwrap();
        library.change_status("2", "checked_out").unwrap();
        assert_eq!(library.search(SearchField::Year, "196").len(), 2);
        assert_eq!(library.search(SearchField::Year, "1965").len(), 1);
        let out = library.search(SearchField::Status, "checked");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 2);
    }

    #[test]
    fn test_search_empty_catalog_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let library = open_in(&dir);
        assert!(library.search(SearchField::Title, "Dune").is_empty());
    }

    #[test]
    fn test_search_preserves_catalog_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = open_in(&dir);
        library.add("Ubik", "Philip K. Dick", "1969").unwrap();
        library.add("Dune", "Frank Herbert", "1965").unwrap();
        library.add("Solaris", "Stanisław Lem", "1961").unwrap();
        let all = library.search(SearchField::Title, "");
        assert_eq!(all.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_mutations_persist_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        let mut library = open_in(&dir);
        library.add("Dune", "Frank Herbert", "1965").unwrap();
        library.add("Solaris", "Stanisław Lem", "1961").unwrap();
        library.change_status("1", "checked_out").unwrap();
        drop(library);

        let reopened = Library::open(CatalogStore::new(&path), |_| Recovery::Abort).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.find_by_id(1).unwrap().status, BookStatus::CheckedOut);
        assert_eq!(reopened.find_by_id(2).unwrap().title, "Solaris");
    }

    #[test]
    fn test_open_missing_document_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let library = open_in(&dir);
        assert!(library.is_empty());
    }

    #[test]
    fn test_open_corrupt_document_reinitializes_on_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, "definitely not json").unwrap();
        let mut asked_about = PathBuf::new();
        let mut library = Library::open(CatalogStore::new(&path), |p| {
            asked_about = p.to_path_buf();
            Recovery::Reinitialize
        })
        .unwrap();
        assert_eq!(asked_about, path);
        assert!(library.is_empty());
        // The next successful mutation replaces the broken document.
        library.add("Dune", "Frank Herbert", "1965").unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Dune"));
    }

    #[test]
    fn test_open_corrupt_document_aborts_on_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, "definitely not json").unwrap();
        let err = Library::open(CatalogStore::new(&path), |_| Recovery::Abort).unwrap_err();
        assert!(matches!(&*err, ErrorKind::CorruptCatalog(_)));
        // The broken document is left alone for inspection.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "definitely not json");
    }

    #[test]
    fn test_full_lifecycle_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = open_in(&dir);

        assert_eq!(library.add("Dune", "Herbert", "1965").unwrap(), Outcome::Added(1));
        assert_eq!(library.len(), 1);
        assert_eq!(library.find_by_id(1).unwrap().status, BookStatus::Available);

        assert_eq!(library.add("Dune", "Herbert", "1965").unwrap(), Outcome::DuplicateBook);
        assert_eq!(library.len(), 1);

        assert_eq!(
            library.change_status("1", "checked_out").unwrap(),
            Outcome::StatusChanged(1, BookStatus::CheckedOut)
        );

        assert_eq!(library.remove("1", approve).unwrap(), Outcome::Removed(1));
        assert!(library.is_empty());

        assert_eq!(library.remove("1", approve).unwrap(), Outcome::EmptyCatalog);
    }
}
