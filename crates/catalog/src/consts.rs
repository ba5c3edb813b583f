/// File name used for the catalog document when nothing else is configured.
pub const DEFAULT_CATALOG_FILE: &str = "library.json";

/// Latest publication year accepted by default.
///
/// Overridable through configuration; the default stays a literal rather
/// than the wall clock so that behaviour does not change on New Year's Day.
pub const MAX_PUBLICATION_YEAR: i32 = 2024;
