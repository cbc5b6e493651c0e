//! In-process store for development and tests.
//!
//! Tables keep insertion order, which is the "store order" unsorted lists
//! come back in.

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CatalogStore;
use crate::models::{Author, Book, BookInstance, Genre};

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub authors: IndexMap<Uuid, Author>,
    pub books: IndexMap<Uuid, Book>,
    pub genres: IndexMap<Uuid, Genre>,
    pub book_instances: IndexMap<Uuid, BookInstance>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub(crate) tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn close(&self) {}
}

/// Clone every value and sort by `key`.
pub(crate) fn sorted_by<T: Clone, K: Ord>(
    table: &IndexMap<Uuid, T>,
    key: impl Fn(&T) -> K,
) -> Vec<T> {
    let mut rows: Vec<T> = table.values().cloned().collect();
    rows.sort_by_key(|row| key(row));
    rows
}
