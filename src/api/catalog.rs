//! Catalog home page

use axum::{extract::State, response::Html};
use minijinja::context;

use crate::{error::AppResult, AppState};

/// Record counts across the catalog
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let counts = state.services.catalog.counts().await?;
    state
        .views
        .render("index.html", "Local Library Home", context! { counts })
}
