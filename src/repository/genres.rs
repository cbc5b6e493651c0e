//! Genre storage

use async_trait::async_trait;
use uuid::Uuid;

use super::{memory::sorted_by, MemoryStore, PgStore};
use crate::{
    error::AppResult,
    models::{Genre, GenreDraft},
};

#[async_trait]
pub trait GenresRepository {
    /// All genres ordered by name
    async fn genres_list(&self) -> AppResult<Vec<Genre>>;

    async fn genres_get_by_id(&self, id: Uuid) -> AppResult<Option<Genre>>;

    /// Genres among `ids`, ordered by name; unknown ids are skipped
    async fn genres_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>>;

    /// Exact-match lookup on the natural key
    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>>;

    async fn genres_count(&self) -> AppResult<i64>;

    async fn genres_create(&self, draft: &GenreDraft) -> AppResult<Genre>;

    async fn genres_replace(&self, id: Uuid, draft: &GenreDraft) -> AppResult<Option<Genre>>;

    async fn genres_delete(&self, id: Uuid) -> AppResult<()>;
}

#[async_trait]
impl GenresRepository for PgStore {
    async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>("SELECT * FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn genres_get_by_id(&self, id: Uuid) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>("SELECT * FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn genres_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows =
            sqlx::query_as::<_, Genre>("SELECT * FROM genres WHERE id = ANY($1) ORDER BY name")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>("SELECT * FROM genres WHERE name = $1 LIMIT 1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn genres_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn genres_create(&self, draft: &GenreDraft) -> AppResult<Genre> {
        let row = sqlx::query_as::<_, Genre>(
            "INSERT INTO genres (id, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&draft.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn genres_replace(&self, id: Uuid, draft: &GenreDraft) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>(
            "UPDATE genres SET name = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&draft.name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn genres_delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl GenresRepository for MemoryStore {
    async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        let tables = self.tables.read().await;
        Ok(sorted_by(&tables.genres, |g| g.name.clone()))
    }

    async fn genres_get_by_id(&self, id: Uuid) -> AppResult<Option<Genre>> {
        Ok(self.tables.read().await.genres.get(&id).cloned())
    }

    async fn genres_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Genre> = Vec::with_capacity(ids.len());
        for id in ids {
            if rows.iter().any(|g| g.id == *id) {
                continue;
            }
            if let Some(genre) = tables.genres.get(id) {
                rows.push(genre.clone());
            }
        }
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let tables = self.tables.read().await;
        Ok(tables.genres.values().find(|g| g.name == name).cloned())
    }

    async fn genres_count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.genres.len() as i64)
    }

    async fn genres_create(&self, draft: &GenreDraft) -> AppResult<Genre> {
        let genre = Genre::from_draft(Uuid::new_v4(), draft.clone());
        self.tables.write().await.genres.insert(genre.id, genre.clone());
        Ok(genre)
    }

    async fn genres_replace(&self, id: Uuid, draft: &GenreDraft) -> AppResult<Option<Genre>> {
        let mut tables = self.tables.write().await;
        Ok(tables.genres.get_mut(&id).map(|slot| {
            *slot = Genre::from_draft(id, draft.clone());
            slot.clone()
        }))
    }

    async fn genres_delete(&self, id: Uuid) -> AppResult<()> {
        self.tables.write().await.genres.shift_remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> GenreDraft {
        GenreDraft { name: name.into() }
    }

    #[tokio::test]
    async fn find_by_name_is_exact() {
        let store = MemoryStore::new();
        let fantasy = store.genres_create(&draft("Fantasy")).await.unwrap();

        let found = store.genres_find_by_name("Fantasy").await.unwrap();
        assert_eq!(found.map(|g| g.id), Some(fantasy.id));
        assert!(store.genres_find_by_name("fantasy").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_many_skips_unknown_ids() {
        let store = MemoryStore::new();
        let poetry = store.genres_create(&draft("Poetry")).await.unwrap();
        let drama = store.genres_create(&draft("Drama")).await.unwrap();

        let genres = store
            .genres_get_many(&[poetry.id, Uuid::new_v4(), drama.id])
            .await
            .unwrap();
        let names: Vec<_> = genres.into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Drama", "Poetry"]);
    }
}
