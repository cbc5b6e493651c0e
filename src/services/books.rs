//! Book workflows

use std::{collections::HashMap, sync::Arc};

use uuid::Uuid;

use super::{warn_on_target_mismatch, DeleteOutcome, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookDetail, BookDraft, BookForm, BookFormOptions, BookInstance, BookListEntry},
    repository::CatalogStore,
};

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn CatalogStore>,
}

fn not_found() -> AppError {
    AppError::NotFound("Book not found".to_string())
}

impl BooksService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Books by title, each with its author
    pub async fn list(&self) -> AppResult<Vec<BookListEntry>> {
        let (books, authors) =
            tokio::try_join!(self.store.books_list(), self.store.authors_list())?;
        let authors: HashMap<_, _> = authors.into_iter().map(|a| (a.id, a)).collect();

        Ok(books
            .into_iter()
            .map(|book| BookListEntry {
                author: authors.get(&book.author).cloned(),
                book,
            })
            .collect())
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookDetail> {
        let (book, instances) = tokio::try_join!(
            self.store.books_get_by_id(id),
            self.store.book_instances_find_by_book(id),
        )?;
        let book = book.ok_or_else(not_found)?;

        let (author, genres) = tokio::try_join!(
            self.store.authors_get_by_id(book.author),
            self.store.genres_get_many(&book.genre),
        )?;

        Ok(BookDetail {
            book,
            author,
            genres,
            instances,
        })
    }

    /// Author and genre choices, with `selected` genres pre-checked
    pub async fn form_options(&self, selected: &[Uuid]) -> AppResult<BookFormOptions> {
        let (authors, genres) =
            tokio::try_join!(self.store.authors_list(), self.store.genres_list())?;
        Ok(BookFormOptions::new(authors, genres, selected))
    }

    /// Stored book plus the selector lists for its update form
    pub async fn edit_form(&self, id: Uuid) -> AppResult<(Book, BookFormOptions)> {
        let (book, authors, genres) = tokio::try_join!(
            self.store.books_get_by_id(id),
            self.store.authors_list(),
            self.store.genres_list(),
        )?;
        let book = book.ok_or_else(not_found)?;
        let options = BookFormOptions::new(authors, genres, &book.genre);
        Ok((book, options))
    }

    pub async fn create(&self, form: BookForm) -> AppResult<FormOutcome<Book, BookDraft>> {
        let (draft, errors) = form.into_draft();
        if !errors.is_empty() {
            return Ok(FormOutcome::Invalid { draft, errors });
        }

        let book = self.store.books_create(&draft).await?;
        tracing::info!(book_id = %book.id, title = %book.title, "Book created");
        Ok(FormOutcome::Saved(book))
    }

    /// Replace the book at `id`; an absent genre list clears its genres
    pub async fn update(&self, id: Uuid, form: BookForm) -> AppResult<FormOutcome<Book, BookDraft>> {
        let (draft, errors) = form.into_draft();
        if !errors.is_empty() {
            return Ok(FormOutcome::Invalid { draft, errors });
        }

        let book = self
            .store
            .books_replace(id, &draft)
            .await?
            .ok_or_else(not_found)?;
        tracing::info!(book_id = %id, genres = book.genre.len(), "Book updated");
        Ok(FormOutcome::Saved(book))
    }

    pub async fn delete_context(&self, id: Uuid) -> AppResult<Option<(Book, Vec<BookInstance>)>> {
        let (book, instances) = tokio::try_join!(
            self.store.books_get_by_id(id),
            self.store.book_instances_find_by_book(id),
        )?;
        Ok(book.map(|b| (b, instances)))
    }

    /// Delete `target_id` unless the book at `route_id` still has copies
    pub async fn delete(
        &self,
        route_id: Uuid,
        target_id: Uuid,
    ) -> AppResult<DeleteOutcome<Book, BookInstance>> {
        let (book, instances) = tokio::try_join!(
            self.store.books_get_by_id(route_id),
            self.store.book_instances_find_by_book(route_id),
        )?;

        if !instances.is_empty() {
            tracing::info!(book_id = %route_id, copies = instances.len(), "Book delete blocked");
            return Ok(DeleteOutcome::Blocked {
                record: book,
                dependents: instances,
            });
        }

        warn_on_target_mismatch("book", route_id, target_id);
        self.store.books_delete(target_id).await?;
        tracing::info!(book_id = %target_id, "Book deleted");
        Ok(DeleteOutcome::Deleted)
    }
}
