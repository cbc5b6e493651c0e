//! Book instance storage

use async_trait::async_trait;
use uuid::Uuid;

use super::{MemoryStore, PgStore};
use crate::{
    error::AppResult,
    models::{BookInstance, BookInstanceDraft, BookInstanceStatus},
};

#[async_trait]
pub trait BookInstancesRepository {
    /// All copies in store order
    async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>>;

    async fn book_instances_get_by_id(&self, id: Uuid) -> AppResult<Option<BookInstance>>;

    /// Copies of `book_id`
    async fn book_instances_find_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>>;

    async fn book_instances_count(&self) -> AppResult<i64>;

    async fn book_instances_count_by_status(&self, status: BookInstanceStatus) -> AppResult<i64>;

    async fn book_instances_create(&self, draft: &BookInstanceDraft) -> AppResult<BookInstance>;

    async fn book_instances_replace(
        &self,
        id: Uuid,
        draft: &BookInstanceDraft,
    ) -> AppResult<Option<BookInstance>>;

    async fn book_instances_delete(&self, id: Uuid) -> AppResult<()>;
}

#[async_trait]
impl BookInstancesRepository for PgStore {
    async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstance>("SELECT * FROM book_instances")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn book_instances_get_by_id(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        let row = sqlx::query_as::<_, BookInstance>("SELECT * FROM book_instances WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn book_instances_find_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let rows =
            sqlx::query_as::<_, BookInstance>("SELECT * FROM book_instances WHERE book_id = $1")
                .bind(book_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    async fn book_instances_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn book_instances_count_by_status(&self, status: BookInstanceStatus) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
                .bind(status.as_str())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn book_instances_create(&self, draft: &BookInstanceDraft) -> AppResult<BookInstance> {
        let row = sqlx::query_as::<_, BookInstance>(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(draft.book)
        .bind(&draft.imprint)
        .bind(draft.status.as_str())
        .bind(draft.due_back)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn book_instances_replace(
        &self,
        id: Uuid,
        draft: &BookInstanceDraft,
    ) -> AppResult<Option<BookInstance>> {
        let row = sqlx::query_as::<_, BookInstance>(
            r#"
            UPDATE book_instances
            SET book_id = $2, imprint = $3, status = $4, due_back = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(draft.book)
        .bind(&draft.imprint)
        .bind(draft.status.as_str())
        .bind(draft.due_back)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn book_instances_delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl BookInstancesRepository for MemoryStore {
    async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>> {
        let tables = self.tables.read().await;
        Ok(tables.book_instances.values().cloned().collect())
    }

    async fn book_instances_get_by_id(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        Ok(self.tables.read().await.book_instances.get(&id).cloned())
    }

    async fn book_instances_find_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let tables = self.tables.read().await;
        Ok(tables
            .book_instances
            .values()
            .filter(|i| i.book == book_id)
            .cloned()
            .collect())
    }

    async fn book_instances_count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.book_instances.len() as i64)
    }

    async fn book_instances_count_by_status(&self, status: BookInstanceStatus) -> AppResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .book_instances
            .values()
            .filter(|i| i.status == status)
            .count() as i64)
    }

    async fn book_instances_create(&self, draft: &BookInstanceDraft) -> AppResult<BookInstance> {
        let instance = BookInstance::from_draft(Uuid::new_v4(), draft.clone());
        self.tables
            .write()
            .await
            .book_instances
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn book_instances_replace(
        &self,
        id: Uuid,
        draft: &BookInstanceDraft,
    ) -> AppResult<Option<BookInstance>> {
        let mut tables = self.tables.write().await;
        Ok(tables.book_instances.get_mut(&id).map(|slot| {
            *slot = BookInstance::from_draft(id, draft.clone());
            slot.clone()
        }))
    }

    async fn book_instances_delete(&self, id: Uuid) -> AppResult<()> {
        self.tables.write().await.book_instances.shift_remove(&id);
        Ok(())
    }
}
