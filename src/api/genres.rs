//! Genre pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::Form;
use minijinja::context;
use serde::Deserialize;
use uuid::Uuid;

use super::{delete_target, see_other};
use crate::{
    error::AppResult,
    models::GenreForm,
    services::{DeleteOutcome, FormOutcome},
    AppState,
};

const LIST_URL: &str = "/catalog/genres";

#[derive(Debug, Deserialize)]
pub struct DeleteGenreForm {
    pub genreid: Option<String>,
}

pub async fn genre_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let genre_list = state.services.genres.list().await?;
    state
        .views
        .render("genre_list.html", "Genre List", context! { genre_list })
}

pub async fn genre_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let (genre, genre_books) = state.services.genres.detail(id).await?;
    state.views.render(
        "genre_detail.html",
        "Genre Detail",
        context! { genre, genre_books },
    )
}

pub async fn genre_create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    state
        .views
        .render("genre_form.html", "Create Genre", context! {})
}

/// Existing genres with the same name are reused rather than duplicated
pub async fn genre_create(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    match state.services.genres.create(form).await? {
        FormOutcome::Saved(genre) | FormOutcome::Duplicate(genre) => Ok(see_other(&genre.url())),
        FormOutcome::Invalid { draft, errors } => Ok(state
            .views
            .render(
                "genre_form.html",
                "Create Genre",
                context! { genre => draft, errors },
            )?
            .into_response()),
    }
}

pub async fn genre_update_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let genre = state.services.genres.get(id).await?;
    state
        .views
        .render("genre_form.html", "Update Genre", context! { genre })
}

pub async fn genre_update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    match state.services.genres.update(id, form).await? {
        FormOutcome::Saved(genre) | FormOutcome::Duplicate(genre) => Ok(see_other(&genre.url())),
        FormOutcome::Invalid { draft, errors } => Ok(state
            .views
            .render(
                "genre_form.html",
                "Update Genre",
                context! { genre => draft, errors },
            )?
            .into_response()),
    }
}

pub async fn genre_delete_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let Some((genre, genre_books)) = state.services.genres.delete_context(id).await? else {
        return Ok(see_other(LIST_URL));
    };
    Ok(state
        .views
        .render(
            "genre_delete.html",
            "Delete Genre",
            context! { genre, genre_books },
        )?
        .into_response())
}

pub async fn genre_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<DeleteGenreForm>,
) -> AppResult<Response> {
    let target = delete_target(form.genreid.as_deref(), "genreid")?;
    match state.services.genres.delete(id, target).await? {
        DeleteOutcome::Deleted => Ok(see_other(LIST_URL)),
        DeleteOutcome::Blocked { record, dependents } => Ok(state
            .views
            .render(
                "genre_delete.html",
                "Delete Genre",
                context! { genre => record, genre_books => dependents },
            )?
            .into_response()),
    }
}
