//! Author workflows

use std::sync::Arc;

use uuid::Uuid;

use super::{warn_on_target_mismatch, DeleteOutcome, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorDraft, AuthorForm, Book},
    repository::CatalogStore,
};

#[derive(Clone)]
pub struct AuthorsService {
    store: Arc<dyn CatalogStore>,
}

fn not_found() -> AppError {
    AppError::NotFound("Author not found".to_string())
}

impl AuthorsService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.store.authors_list().await
    }

    /// Author plus every book they wrote
    pub async fn detail(&self, id: Uuid) -> AppResult<(Author, Vec<Book>)> {
        let (author, books) = tokio::try_join!(
            self.store.authors_get_by_id(id),
            self.store.books_find_by_author(id),
        )?;
        let author = author.ok_or_else(not_found)?;
        Ok((author, books))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Author> {
        self.store.authors_get_by_id(id).await?.ok_or_else(not_found)
    }

    pub async fn create(&self, form: AuthorForm) -> AppResult<FormOutcome<Author, AuthorDraft>> {
        let (draft, errors) = form.into_draft();
        if !errors.is_empty() {
            return Ok(FormOutcome::Invalid { draft, errors });
        }

        let author = self.store.authors_create(&draft).await?;
        tracing::info!(author_id = %author.id, "Author created");
        Ok(FormOutcome::Saved(author))
    }

    /// Replace the author at `id` with the submitted values
    pub async fn update(
        &self,
        id: Uuid,
        form: AuthorForm,
    ) -> AppResult<FormOutcome<Author, AuthorDraft>> {
        let (draft, errors) = form.into_draft();
        if !errors.is_empty() {
            return Ok(FormOutcome::Invalid { draft, errors });
        }

        let author = self
            .store
            .authors_replace(id, &draft)
            .await?
            .ok_or_else(not_found)?;
        tracing::info!(author_id = %id, "Author updated");
        Ok(FormOutcome::Saved(author))
    }

    /// Author and their books for the delete confirmation; `None` when absent
    pub async fn delete_context(&self, id: Uuid) -> AppResult<Option<(Author, Vec<Book>)>> {
        let (author, books) = tokio::try_join!(
            self.store.authors_get_by_id(id),
            self.store.books_find_by_author(id),
        )?;
        Ok(author.map(|a| (a, books)))
    }

    /// Delete `target_id` unless the author at `route_id` still has books
    pub async fn delete(
        &self,
        route_id: Uuid,
        target_id: Uuid,
    ) -> AppResult<DeleteOutcome<Author, Book>> {
        let (author, books) = tokio::try_join!(
            self.store.authors_get_by_id(route_id),
            self.store.books_find_by_author(route_id),
        )?;

        if !books.is_empty() {
            tracing::info!(author_id = %route_id, books = books.len(), "Author delete blocked");
            return Ok(DeleteOutcome::Blocked {
                record: author,
                dependents: books,
            });
        }

        warn_on_target_mismatch("author", route_id, target_id);
        self.store.authors_delete(target_id).await?;
        tracing::info!(author_id = %target_id, "Author deleted");
        Ok(DeleteOutcome::Deleted)
    }
}
