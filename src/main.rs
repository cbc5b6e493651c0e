//! Local Library catalog server

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_catalog::{
    config::{AppConfig, StoreBackend},
    create_router,
    repository::{CatalogStore, MemoryStore, PgStore},
    services::Services,
    views::Views,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("library_catalog={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Local Library v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn CatalogStore> = match config.database.backend {
        StoreBackend::Postgres => {
            let store = PgStore::connect(&config.database)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");

            store
                .migrate()
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations completed");
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; records are lost on shutdown");
            Arc::new(MemoryStore::new())
        }
    };

    let views = Views::new().context("Failed to compile templates")?;

    let addr = SocketAddr::new(
        config
            .server
            .host
            .parse()
            .context("Invalid host address")?,
        config.server.port,
    );

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(Services::new(store.clone())),
        views: Arc::new(views),
    };

    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!(backend = store.backend(), "Store closed");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
