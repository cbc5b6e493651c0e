//! Book model and related types

use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{author::Author, book_instance::BookInstance, genre::Genre};
use crate::validation;

/// Stored book record
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    /// Author id
    #[sqlx(rename = "author_id")]
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    /// Genre ids
    #[sqlx(rename = "genre_ids")]
    pub genre: Vec<Uuid>,
}

impl Book {
    pub fn from_draft(id: Uuid, draft: BookDraft) -> Self {
        Self {
            id,
            title: draft.title,
            author: draft.author,
            summary: draft.summary,
            isbn: draft.isbn,
            genre: draft.genre,
        }
    }

    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

pub fn book_url(id: Uuid) -> String {
    format!("/catalog/book/{}", id)
}

impl Serialize for Book {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Book", 7)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("title", &self.title)?;
        s.serialize_field("author", &self.author)?;
        s.serialize_field("summary", &self.summary)?;
        s.serialize_field("isbn", &self.isbn)?;
        s.serialize_field("genre", &self.genre)?;
        s.serialize_field("url", &self.url())?;
        s.end()
    }
}

/// Sanitized, not yet persisted book.
///
/// `author` is nil when the submitted value was not a record id; such a draft
/// always comes with an error and is never written.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookDraft {
    pub title: String,
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<Uuid>,
}

/// Book create/update form body.
///
/// `genre` arrives as zero, one or many `genre=<id>` pairs; form decoding
/// turns all three shapes into a list.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Author must not be empty."),
        custom(function = "validation::record_id", message = "Author must not be empty.")
    )]
    pub author: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    pub summary: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    pub isbn: String,
    #[serde(default)]
    pub genre: Vec<String>,
}

impl BookForm {
    const FIELDS: &'static [&'static str] = &["title", "author", "summary", "isbn"];

    pub fn into_draft(mut self) -> (BookDraft, Vec<String>) {
        validation::trim_in_place(&mut self.title);
        validation::trim_in_place(&mut self.author);
        validation::trim_in_place(&mut self.summary);
        validation::trim_in_place(&mut self.isbn);

        let errors = validation::collect_messages(self.validate(), Self::FIELDS);
        let draft = BookDraft {
            title: validation::escape(&self.title),
            author: Uuid::parse_str(&self.author).unwrap_or_default(),
            summary: validation::escape(&self.summary),
            isbn: validation::escape(&self.isbn),
            genre: self
                .genre
                .iter()
                .map(|g| validation::escape(g))
                .filter_map(|g| Uuid::parse_str(&g).ok())
                .collect(),
        };
        (draft, errors)
    }
}

/// Book with its author resolved, for list pages
#[derive(Debug, Clone, Serialize)]
pub struct BookListEntry {
    pub book: Book,
    pub author: Option<Author>,
}

/// Book with author, genres and copies resolved
#[derive(Debug, Clone, Serialize)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

/// A genre checkbox on the book form
#[derive(Debug, Clone, Serialize)]
pub struct GenreChoice {
    pub genre: Genre,
    pub checked: bool,
}

/// Reference lists for the book form selectors
#[derive(Debug, Clone, Serialize)]
pub struct BookFormOptions {
    pub authors: Vec<Author>,
    pub genres: Vec<GenreChoice>,
}

impl BookFormOptions {
    /// Mark every genre whose id is in `selected` as checked.
    pub fn new(authors: Vec<Author>, genres: Vec<Genre>, selected: &[Uuid]) -> Self {
        let genres = genres
            .into_iter()
            .map(|genre| GenreChoice {
                checked: selected.contains(&genre.id),
                genre,
            })
            .collect();
        Self { authors, genres }
    }
}
