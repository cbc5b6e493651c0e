//! Entity store: one repository trait per record type, two backends.
//!
//! Referential integrity is not enforced here; callers check dependents
//! before deleting.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;

pub use authors::AuthorsRepository;
pub use book_instances::BookInstancesRepository;
pub use books::BooksRepository;
pub use genres::GenresRepository;
pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Everything the catalog services need from a store
#[async_trait]
pub trait CatalogStore:
    AuthorsRepository + BooksRepository + GenresRepository + BookInstancesRepository + Send + Sync
{
    /// Short backend name for logs
    fn backend(&self) -> &'static str;

    /// Release connections; called once at shutdown
    async fn close(&self);
}
