//! Book copy workflows

use std::{collections::HashMap, sync::Arc};

use uuid::Uuid;

use super::{warn_on_target_mismatch, DeleteOutcome, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookInstance, BookInstanceDraft, BookInstanceEntry, BookInstanceForm},
    repository::CatalogStore,
};

#[derive(Clone)]
pub struct BookInstancesService {
    store: Arc<dyn CatalogStore>,
}

fn not_found() -> AppError {
    AppError::NotFound("Book copy not found".to_string())
}

impl BookInstancesService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Every copy with its book resolved
    pub async fn list(&self) -> AppResult<Vec<BookInstanceEntry>> {
        let (instances, books) =
            tokio::try_join!(self.store.book_instances_list(), self.store.books_list())?;
        let books: HashMap<_, _> = books.into_iter().map(|b| (b.id, b)).collect();

        Ok(instances
            .into_iter()
            .map(|instance| BookInstanceEntry {
                book: books.get(&instance.book).cloned(),
                instance,
            })
            .collect())
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookInstanceEntry> {
        let instance = self
            .store
            .book_instances_get_by_id(id)
            .await?
            .ok_or_else(not_found)?;
        let book = self.store.books_get_by_id(instance.book).await?;
        Ok(BookInstanceEntry { instance, book })
    }

    /// Book choices for the copy form
    pub async fn books(&self) -> AppResult<Vec<Book>> {
        self.store.books_list().await
    }

    pub async fn edit_form(&self, id: Uuid) -> AppResult<(BookInstance, Vec<Book>)> {
        let (instance, books) = tokio::try_join!(
            self.store.book_instances_get_by_id(id),
            self.store.books_list(),
        )?;
        Ok((instance.ok_or_else(not_found)?, books))
    }

    pub async fn create(
        &self,
        form: BookInstanceForm,
    ) -> AppResult<FormOutcome<BookInstance, BookInstanceDraft>> {
        let (draft, errors) = form.into_draft();
        if !errors.is_empty() {
            return Ok(FormOutcome::Invalid { draft, errors });
        }

        let instance = self.store.book_instances_create(&draft).await?;
        tracing::info!(
            instance_id = %instance.id,
            book_id = %instance.book,
            status = %instance.status,
            "Book copy created"
        );
        Ok(FormOutcome::Saved(instance))
    }

    pub async fn update(
        &self,
        id: Uuid,
        form: BookInstanceForm,
    ) -> AppResult<FormOutcome<BookInstance, BookInstanceDraft>> {
        let (draft, errors) = form.into_draft();
        if !errors.is_empty() {
            return Ok(FormOutcome::Invalid { draft, errors });
        }

        let instance = self
            .store
            .book_instances_replace(id, &draft)
            .await?
            .ok_or_else(not_found)?;
        tracing::info!(instance_id = %id, status = %instance.status, "Book copy updated");
        Ok(FormOutcome::Saved(instance))
    }

    pub async fn delete_context(&self, id: Uuid) -> AppResult<Option<BookInstanceEntry>> {
        let Some(instance) = self.store.book_instances_get_by_id(id).await? else {
            return Ok(None);
        };
        let book = self.store.books_get_by_id(instance.book).await?;
        Ok(Some(BookInstanceEntry { instance, book }))
    }

    /// Copies have no dependents, so deletion always goes through
    pub async fn delete(
        &self,
        route_id: Uuid,
        target_id: Uuid,
    ) -> AppResult<DeleteOutcome<BookInstance, ()>> {
        warn_on_target_mismatch("book_instance", route_id, target_id);
        self.store.book_instances_delete(target_id).await?;
        tracing::info!(instance_id = %target_id, "Book copy deleted");
        Ok(DeleteOutcome::Deleted)
    }
}
