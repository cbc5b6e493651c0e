//! Local Library catalog server
//!
//! Server-rendered HTML pages for browsing and editing a small library's
//! authors, books, genres and book copies.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub views: Arc<views::Views>,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(api::catalog::index))
        // Authors
        .route("/authors", get(api::authors::author_list))
        .route(
            "/author/create",
            get(api::authors::author_create_form).post(api::authors::author_create),
        )
        .route("/author/:id", get(api::authors::author_detail))
        .route(
            "/author/:id/update",
            get(api::authors::author_update_form).post(api::authors::author_update),
        )
        .route(
            "/author/:id/delete",
            get(api::authors::author_delete_form).post(api::authors::author_delete),
        )
        // Books
        .route("/books", get(api::books::book_list))
        .route(
            "/book/create",
            get(api::books::book_create_form).post(api::books::book_create),
        )
        .route("/book/:id", get(api::books::book_detail))
        .route(
            "/book/:id/update",
            get(api::books::book_update_form).post(api::books::book_update),
        )
        .route(
            "/book/:id/delete",
            get(api::books::book_delete_form).post(api::books::book_delete),
        )
        // Genres
        .route("/genres", get(api::genres::genre_list))
        .route(
            "/genre/create",
            get(api::genres::genre_create_form).post(api::genres::genre_create),
        )
        .route("/genre/:id", get(api::genres::genre_detail))
        .route(
            "/genre/:id/update",
            get(api::genres::genre_update_form).post(api::genres::genre_update),
        )
        .route(
            "/genre/:id/delete",
            get(api::genres::genre_delete_form).post(api::genres::genre_delete),
        )
        // Book copies
        .route("/bookinstances", get(api::book_instances::bookinstance_list))
        .route(
            "/bookinstance/create",
            get(api::book_instances::bookinstance_create_form)
                .post(api::book_instances::bookinstance_create),
        )
        .route(
            "/bookinstance/:id",
            get(api::book_instances::bookinstance_detail),
        )
        .route(
            "/bookinstance/:id/update",
            get(api::book_instances::bookinstance_update_form)
                .post(api::book_instances::bookinstance_update),
        )
        .route(
            "/bookinstance/:id/delete",
            get(api::book_instances::bookinstance_delete_form)
                .post(api::book_instances::bookinstance_delete),
        );

    Router::new()
        .route("/", get(|| async { api::see_other("/catalog/") }))
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Nesting maps the inner "/" to "/catalog" only
        .route("/catalog/", get(api::catalog::index))
        .nest("/catalog", catalog)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}
