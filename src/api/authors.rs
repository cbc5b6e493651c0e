//! Author pages

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
    models::AuthorForm,
    services::{DeleteOutcome, FormOutcome},
    AppState,
};

const LIST_URL: &str = "/catalog/authors";

#[derive(Debug, Deserialize)]
pub struct DeleteAuthorForm {
    pub authorid: Option<String>,
}

pub async fn author_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let author_list = state.services.authors.list().await?;
    state
        .views
        .render("author_list.html", "Author List", context! { author_list })
}

pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let (author, author_books) = state.services.authors.detail(id).await?;
    state.views.render(
        "author_detail.html",
        "Author Detail",
        context! { author, author_books },
    )
}

pub async fn author_create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    state
        .views
        .render("author_form.html", "Create Author", context! {})
}

pub async fn author_create(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.create(form).await? {
        FormOutcome::Saved(author) | FormOutcome::Duplicate(author) => Ok(see_other(&author.url())),
        FormOutcome::Invalid { draft, errors } => Ok(state
            .views
            .render(
                "author_form.html",
                "Create Author",
                context! { author => draft, errors },
            )?
            .into_response()),
    }
}

pub async fn author_update_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let author = state.services.authors.get(id).await?;
    state
        .views
        .render("author_form.html", "Update Author", context! { author })
}

pub async fn author_update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.update(id, form).await? {
        FormOutcome::Saved(author) | FormOutcome::Duplicate(author) => Ok(see_other(&author.url())),
        FormOutcome::Invalid { draft, errors } => Ok(state
            .views
            .render(
                "author_form.html",
                "Update Author",
                context! { author => draft, errors },
            )?
            .into_response()),
    }
}

pub async fn author_delete_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let Some((author, author_books)) = state.services.authors.delete_context(id).await? else {
        return Ok(see_other(LIST_URL));
    };
    Ok(state
        .views
        .render(
            "author_delete.html",
            "Delete Author",
            context! { author, author_books },
        )?
        .into_response())
}

pub async fn author_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<DeleteAuthorForm>,
) -> AppResult<Response> {
    let target = delete_target(form.authorid.as_deref(), "authorid")?;
    match state.services.authors.delete(id, target).await? {
        DeleteOutcome::Deleted => Ok(see_other(LIST_URL)),
        DeleteOutcome::Blocked { record, dependents } => Ok(state
            .views
            .render(
                "author_delete.html",
                "Delete Author",
                context! { author => record, author_books => dependents },
            )?
            .into_response()),
    }
}
