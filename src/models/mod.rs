//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use chrono::NaiveDate;

// Re-export commonly used types
pub use author::{Author, AuthorDraft, AuthorForm};
pub use book::{Book, BookDetail, BookDraft, BookForm, BookFormOptions, BookListEntry};
pub use book_instance::{
    BookInstance, BookInstanceDraft, BookInstanceEntry, BookInstanceForm, BookInstanceStatus,
};
pub use genre::{Genre, GenreDraft, GenreForm};

/// Medium date format used on every page, e.g. "Oct 6, 2020"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
