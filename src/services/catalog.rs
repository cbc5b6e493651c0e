//! Home page record counts

use std::sync::Arc;

use serde::Serialize;

use crate::{
    error::AppResult,
    models::BookInstanceStatus,
    repository::CatalogStore,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogCounts {
    pub book_count: i64,
    pub book_instance_count: i64,
    pub book_instance_available_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let (books, instances, available, authors, genres) = tokio::try_join!(
            self.store.books_count(),
            self.store.book_instances_count(),
            self.store
                .book_instances_count_by_status(BookInstanceStatus::Available),
            self.store.authors_count(),
            self.store.genres_count(),
        )?;

        Ok(CatalogCounts {
            book_count: books,
            book_instance_count: instances,
            book_instance_available_count: available,
            author_count: authors,
            genre_count: genres,
        })
    }

    /// Store round trip for the readiness probe
    pub async fn ping(&self) -> AppResult<&'static str> {
        self.store.authors_count().await?;
        Ok(self.store.backend())
    }
}
