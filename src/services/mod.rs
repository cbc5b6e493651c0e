//! Catalog workflows, one service per record type.
//!
//! Services return explicit outcomes for the recoverable cases (invalid form,
//! duplicate natural key, blocked delete). Missing records and store failures
//! travel as [`crate::error::AppError`].

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;

use std::sync::Arc;

use uuid::Uuid;

use crate::repository::CatalogStore;

/// Result of a create or update submission
#[derive(Debug)]
pub enum FormOutcome<T, D> {
    /// Record written; redirect to it
    Saved(T),
    /// Nothing written; re-render the form with the sanitized draft
    Invalid { draft: D, errors: Vec<String> },
    /// A record with the same natural key already exists; nothing written
    Duplicate(T),
}

/// Result of a delete submission
#[derive(Debug)]
pub enum DeleteOutcome<T, Dep> {
    Deleted,
    /// Dependents still reference the record; nothing deleted
    Blocked {
        record: Option<T>,
        dependents: Vec<Dep>,
    },
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub genres: genres::GenresService,
    pub book_instances: book_instances::BookInstancesService,
}

impl Services {
    /// Create all services over one shared store handle
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            catalog: catalog::CatalogService::new(store.clone()),
            authors: authors::AuthorsService::new(store.clone()),
            books: books::BooksService::new(store.clone()),
            genres: genres::GenresService::new(store.clone()),
            book_instances: book_instances::BookInstancesService::new(store),
        }
    }
}

/// Delete forms name their target in the body; warn when it is not the
/// record the page was opened for.
fn warn_on_target_mismatch(kind: &'static str, route_id: Uuid, target_id: Uuid) {
    if route_id != target_id {
        tracing::warn!(
            kind,
            %route_id,
            %target_id,
            "delete form targets a different record than the route"
        );
    }
}
