//! PostgreSQL-backed store

use async_trait::async_trait;
use sqlx::{migrate::MigrateError, postgres::PgPoolOptions, Pool, Postgres};

use super::CatalogStore;
use crate::config::DatabaseConfig;

/// Store holding the database connection pool
#[derive(Clone)]
pub struct PgStore {
    pub(crate) pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Open the pool described by `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect(&config.url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Create the catalog tables if they are missing
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
