//! Genre workflows
//!
//! Genre names are unique: create and update both check for an existing
//! genre with the submitted name and send the client there instead.

use std::sync::Arc;

use uuid::Uuid;

use super::{warn_on_target_mismatch, DeleteOutcome, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{Book, Genre, GenreDraft, GenreForm},
    repository::CatalogStore,
};

#[derive(Clone)]
pub struct GenresService {
    store: Arc<dyn CatalogStore>,
}

fn not_found() -> AppError {
    AppError::NotFound("Genre not found".to_string())
}

impl GenresService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.store.genres_list().await
    }

    /// Genre plus every book filed under it
    pub async fn detail(&self, id: Uuid) -> AppResult<(Genre, Vec<Book>)> {
        let (genre, books) = tokio::try_join!(
            self.store.genres_get_by_id(id),
            self.store.books_find_by_genre(id),
        )?;
        let genre = genre.ok_or_else(not_found)?;
        Ok((genre, books))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Genre> {
        self.store.genres_get_by_id(id).await?.ok_or_else(not_found)
    }

    pub async fn create(&self, form: GenreForm) -> AppResult<FormOutcome<Genre, GenreDraft>> {
        let (draft, errors) = form.into_draft();
        if !errors.is_empty() {
            return Ok(FormOutcome::Invalid { draft, errors });
        }

        if let Some(existing) = self.store.genres_find_by_name(&draft.name).await? {
            tracing::debug!(genre_id = %existing.id, "Genre already exists");
            return Ok(FormOutcome::Duplicate(existing));
        }

        let genre = self.store.genres_create(&draft).await?;
        tracing::info!(genre_id = %genre.id, name = %genre.name, "Genre created");
        Ok(FormOutcome::Saved(genre))
    }

    /// Rename the genre at `id`. A name that is already taken, including by
    /// this genre, leaves the store untouched.
    pub async fn update(
        &self,
        id: Uuid,
        form: GenreForm,
    ) -> AppResult<FormOutcome<Genre, GenreDraft>> {
        let (draft, errors) = form.into_draft();
        if !errors.is_empty() {
            return Ok(FormOutcome::Invalid { draft, errors });
        }

        if let Some(existing) = self.store.genres_find_by_name(&draft.name).await? {
            tracing::debug!(genre_id = %existing.id, "Genre already exists");
            return Ok(FormOutcome::Duplicate(existing));
        }

        let genre = self
            .store
            .genres_replace(id, &draft)
            .await?
            .ok_or_else(not_found)?;
        tracing::info!(genre_id = %id, name = %genre.name, "Genre updated");
        Ok(FormOutcome::Saved(genre))
    }

    pub async fn delete_context(&self, id: Uuid) -> AppResult<Option<(Genre, Vec<Book>)>> {
        let (genre, books) = tokio::try_join!(
            self.store.genres_get_by_id(id),
            self.store.books_find_by_genre(id),
        )?;
        Ok(genre.map(|g| (g, books)))
    }

    /// Delete `target_id` unless books are still filed under the genre at `route_id`
    pub async fn delete(
        &self,
        route_id: Uuid,
        target_id: Uuid,
    ) -> AppResult<DeleteOutcome<Genre, Book>> {
        let (genre, books) = tokio::try_join!(
            self.store.genres_get_by_id(route_id),
            self.store.books_find_by_genre(route_id),
        )?;

        if !books.is_empty() {
            tracing::info!(genre_id = %route_id, books = books.len(), "Genre delete blocked");
            return Ok(DeleteOutcome::Blocked {
                record: genre,
                dependents: books,
            });
        }

        warn_on_target_mismatch("genre", route_id, target_id);
        self.store.genres_delete(target_id).await?;
        tracing::info!(genre_id = %target_id, "Genre deleted");
        Ok(DeleteOutcome::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::BookDraft,
        repository::{BooksRepository, GenresRepository, MemoryStore},
    };

    fn service() -> (GenresService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (GenresService::new(store.clone()), store)
    }

    fn form(name: &str) -> GenreForm {
        GenreForm { name: name.into() }
    }

    #[tokio::test]
    async fn second_create_with_same_name_is_duplicate() {
        let (service, store) = service();
        let FormOutcome::Saved(first) = service.create(form("Fantasy")).await.unwrap() else {
            panic!("genre not saved");
        };

        let outcome = service.create(form("  Fantasy ")).await.unwrap();
        assert!(matches!(outcome, FormOutcome::Duplicate(g) if g.id == first.id));
        assert_eq!(store.genres_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn short_name_is_rejected() {
        let (service, store) = service();
        let outcome = service.create(form("Sc")).await.unwrap();
        assert!(matches!(outcome, FormOutcome::Invalid { ref draft, .. } if draft.name == "Sc"));
        assert_eq!(store.genres_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_to_taken_name_writes_nothing() {
        let (service, _) = service();
        let FormOutcome::Saved(poetry) = service.create(form("Poetry")).await.unwrap() else {
            panic!("genre not saved");
        };
        let FormOutcome::Saved(drama) = service.create(form("Drama")).await.unwrap() else {
            panic!("genre not saved");
        };

        let outcome = service.update(drama.id, form("Poetry")).await.unwrap();
        assert!(matches!(outcome, FormOutcome::Duplicate(g) if g.id == poetry.id));
        assert_eq!(service.get(drama.id).await.unwrap().name, "Drama");
    }

    #[tokio::test]
    async fn rename_to_free_name() {
        let (service, _) = service();
        let FormOutcome::Saved(genre) = service.create(form("Scifi")).await.unwrap() else {
            panic!("genre not saved");
        };
        let outcome = service.update(genre.id, form("Science Fiction")).await.unwrap();
        assert!(matches!(outcome, FormOutcome::Saved(g) if g.name == "Science Fiction"));
    }

    #[tokio::test]
    async fn delete_blocked_while_books_reference_genre() {
        let (service, store) = service();
        let FormOutcome::Saved(genre) = service.create(form("Horror")).await.unwrap() else {
            panic!("genre not saved");
        };
        store
            .books_create(&BookDraft {
                title: "It".into(),
                author: Uuid::new_v4(),
                summary: "Clown".into(),
                isbn: "2".into(),
                genre: vec![genre.id],
            })
            .await
            .unwrap();

        let outcome = service.delete(genre.id, genre.id).await.unwrap();
        assert!(matches!(outcome, DeleteOutcome::Blocked { .. }));
        assert_eq!(store.genres_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_without_books_removes_genre() {
        let (service, store) = service();
        let FormOutcome::Saved(genre) = service.create(form("Poetry")).await.unwrap() else {
            panic!("genre not saved");
        };

        let outcome = service.delete(genre.id, genre.id).await.unwrap();
        assert!(matches!(outcome, DeleteOutcome::Deleted));
        assert!(store.genres_get_by_id(genre.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_the_genre_named_in_the_form() {
        let (service, store) = service();
        let FormOutcome::Saved(opened) = service.create(form("Romance")).await.unwrap() else {
            panic!("genre not saved");
        };
        let FormOutcome::Saved(named) = service.create(form("Western")).await.unwrap() else {
            panic!("genre not saved");
        };

        let outcome = service.delete(opened.id, named.id).await.unwrap();
        assert!(matches!(outcome, DeleteOutcome::Deleted));
        assert!(store.genres_get_by_id(opened.id).await.unwrap().is_some());
        assert!(store.genres_get_by_id(named.id).await.unwrap().is_none());
    }
}
