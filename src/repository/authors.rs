//! Author storage

use async_trait::async_trait;
use uuid::Uuid;

use super::{memory::sorted_by, MemoryStore, PgStore};
use crate::{
    error::AppResult,
    models::{Author, AuthorDraft},
};

#[async_trait]
pub trait AuthorsRepository {
    /// All authors ordered by family name
    async fn authors_list(&self) -> AppResult<Vec<Author>>;

    async fn authors_get_by_id(&self, id: Uuid) -> AppResult<Option<Author>>;

    async fn authors_count(&self) -> AppResult<i64>;

    /// Insert a new author under a fresh id
    async fn authors_create(&self, draft: &AuthorDraft) -> AppResult<Author>;

    /// Overwrite every field of `id`; `None` when no such author
    async fn authors_replace(&self, id: Uuid, draft: &AuthorDraft) -> AppResult<Option<Author>>;

    async fn authors_delete(&self, id: Uuid) -> AppResult<()>;
}

#[async_trait]
impl AuthorsRepository for PgStore {
    async fn authors_list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>("SELECT * FROM authors ORDER BY family_name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn authors_get_by_id(&self, id: Uuid) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn authors_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn authors_create(&self, draft: &AuthorDraft) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (id, first_name, family_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&draft.first_name)
        .bind(&draft.family_name)
        .bind(draft.date_of_birth)
        .bind(draft.date_of_death)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn authors_replace(&self, id: Uuid, draft: &AuthorDraft) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors
            SET first_name = $2, family_name = $3, date_of_birth = $4, date_of_death = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&draft.first_name)
        .bind(&draft.family_name)
        .bind(draft.date_of_birth)
        .bind(draft.date_of_death)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn authors_delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl AuthorsRepository for MemoryStore {
    async fn authors_list(&self) -> AppResult<Vec<Author>> {
        let tables = self.tables.read().await;
        Ok(sorted_by(&tables.authors, |a| a.family_name.clone()))
    }

    async fn authors_get_by_id(&self, id: Uuid) -> AppResult<Option<Author>> {
        Ok(self.tables.read().await.authors.get(&id).cloned())
    }

    async fn authors_count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.authors.len() as i64)
    }

    async fn authors_create(&self, draft: &AuthorDraft) -> AppResult<Author> {
        let author = Author::from_draft(Uuid::new_v4(), draft.clone());
        self.tables
            .write()
            .await
            .authors
            .insert(author.id, author.clone());
        Ok(author)
    }

    async fn authors_replace(&self, id: Uuid, draft: &AuthorDraft) -> AppResult<Option<Author>> {
        let mut tables = self.tables.write().await;
        Ok(tables.authors.get_mut(&id).map(|slot| {
            *slot = Author::from_draft(id, draft.clone());
            slot.clone()
        }))
    }

    async fn authors_delete(&self, id: Uuid) -> AppResult<()> {
        self.tables.write().await.authors.shift_remove(&id);
        Ok(())
    }
}
