mod book;
mod field;
mod status;

pub use self::book::Book;
pub use self::field::SearchField;
pub use self::status::BookStatus;

fn sanitize(s: impl AsRef<str>) -> String {
    s.as_ref().trim().to_lowercase().replace('_', "").replace('-', "").replace(' ', "")
}
