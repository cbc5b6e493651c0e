//! Book storage

use async_trait::async_trait;
use uuid::Uuid;

use super::{memory::sorted_by, MemoryStore, PgStore};
use crate::{
    error::AppResult,
    models::{Book, BookDraft},
};

#[async_trait]
pub trait BooksRepository {
    /// All books ordered by title
    async fn books_list(&self) -> AppResult<Vec<Book>>;

    async fn books_get_by_id(&self, id: Uuid) -> AppResult<Option<Book>>;

    /// Books written by `author_id`
    async fn books_find_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>>;

    /// Books whose genre set contains `genre_id`
    async fn books_find_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>>;

    async fn books_count(&self) -> AppResult<i64>;

    async fn books_create(&self, draft: &BookDraft) -> AppResult<Book>;

    async fn books_replace(&self, id: Uuid, draft: &BookDraft) -> AppResult<Option<Book>>;

    async fn books_delete(&self, id: Uuid) -> AppResult<()>;
}

#[async_trait]
impl BooksRepository for PgStore {
    async fn books_list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY title")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn books_get_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn books_find_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE author_id = $1")
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn books_find_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        // Containment form so the GIN index on genre_ids applies
        let rows = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE genre_ids @> ARRAY[$1]::uuid[]",
        )
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn books_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn books_create(&self, draft: &BookDraft) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, title, author_id, summary, isbn, genre_ids)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&draft.title)
        .bind(draft.author)
        .bind(&draft.summary)
        .bind(&draft.isbn)
        .bind(&draft.genre)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn books_replace(&self, id: Uuid, draft: &BookDraft) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $2, author_id = $3, summary = $4, isbn = $5, genre_ids = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&draft.title)
        .bind(draft.author)
        .bind(&draft.summary)
        .bind(&draft.isbn)
        .bind(&draft.genre)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn books_delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl BooksRepository for MemoryStore {
    async fn books_list(&self) -> AppResult<Vec<Book>> {
        let tables = self.tables.read().await;
        Ok(sorted_by(&tables.books, |b| b.title.clone()))
    }

    async fn books_get_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        Ok(self.tables.read().await.books.get(&id).cloned())
    }

    async fn books_find_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let tables = self.tables.read().await;
        Ok(tables
            .books
            .values()
            .filter(|b| b.author == author_id)
            .cloned()
            .collect())
    }

    async fn books_find_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        let tables = self.tables.read().await;
        Ok(tables
            .books
            .values()
            .filter(|b| b.genre.contains(&genre_id))
            .cloned()
            .collect())
    }

    async fn books_count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.books.len() as i64)
    }

    async fn books_create(&self, draft: &BookDraft) -> AppResult<Book> {
        let book = Book::from_draft(Uuid::new_v4(), draft.clone());
        self.tables.write().await.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn books_replace(&self, id: Uuid, draft: &BookDraft) -> AppResult<Option<Book>> {
        let mut tables = self.tables.write().await;
        Ok(tables.books.get_mut(&id).map(|slot| {
            *slot = Book::from_draft(id, draft.clone());
            slot.clone()
        }))
    }

    async fn books_delete(&self, id: Uuid) -> AppResult<()> {
        self.tables.write().await.books.shift_remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, author: Uuid, genre: Vec<Uuid>) -> BookDraft {
        BookDraft {
            title: title.into(),
            author,
            summary: "s".into(),
            isbn: "1".into(),
            genre,
        }
    }

    #[tokio::test]
    async fn finds_books_by_author_and_genre() {
        let store = MemoryStore::new();
        let (author, other) = (Uuid::new_v4(), Uuid::new_v4());
        let genre = Uuid::new_v4();
        store.books_create(&draft("B", author, vec![genre])).await.unwrap();
        store.books_create(&draft("A", author, vec![])).await.unwrap();
        store.books_create(&draft("C", other, vec![genre])).await.unwrap();

        assert_eq!(store.books_find_by_author(author).await.unwrap().len(), 2);
        assert_eq!(store.books_find_by_genre(genre).await.unwrap().len(), 2);

        let titles: Vec<_> = store
            .books_list()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn replace_writes_empty_genre_set() {
        let store = MemoryStore::new();
        let author = Uuid::new_v4();
        let book = store
            .books_create(&draft("Old", author, vec![Uuid::new_v4()]))
            .await
            .unwrap();

        let replaced = store
            .books_replace(book.id, &draft("New Title", author, vec![]))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(replaced.title, "New Title");
        assert!(replaced.genre.is_empty());
    }
}
