//! Book pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::Form;
use minijinja::{context, Value};
use serde::Deserialize;
use uuid::Uuid;

use super::{delete_target, see_other};
use crate::{
    error::AppResult,
    models::{BookDraft, BookForm},
    services::{DeleteOutcome, FormOutcome},
    AppState,
};

const LIST_URL: &str = "/catalog/books";

#[derive(Debug, Deserialize)]
pub struct DeleteBookForm {
    pub bookid: Option<String>,
}

pub async fn book_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let book_list = state.services.books.list().await?;
    state
        .views
        .render("book_list.html", "Book List", context! { book_list })
}

pub async fn book_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let detail = state.services.books.detail(id).await?;
    state.views.render(
        "book_detail.html",
        &detail.book.title,
        Value::from_serialize(&detail),
    )
}

pub async fn book_create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let options = state.services.books.form_options(&[]).await?;
    state.views.render(
        "book_form.html",
        "Create Book",
        Value::from_serialize(&options),
    )
}

/// Re-render the form with the sanitized draft and its selections kept
async fn invalid_book_form(
    state: &AppState,
    title: &str,
    draft: BookDraft,
    errors: Vec<String>,
) -> AppResult<Response> {
    let options = state.services.books.form_options(&draft.genre).await?;
    Ok(state
        .views
        .render(
            "book_form.html",
            title,
            context! { book => draft, errors, ..Value::from_serialize(&options) },
        )?
        .into_response())
}

pub async fn book_create(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    match state.services.books.create(form).await? {
        FormOutcome::Saved(book) | FormOutcome::Duplicate(book) => Ok(see_other(&book.url())),
        FormOutcome::Invalid { draft, errors } => {
            invalid_book_form(&state, "Create Book", draft, errors).await
        }
    }
}

pub async fn book_update_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let (book, options) = state.services.books.edit_form(id).await?;
    state.views.render(
        "book_form.html",
        "Update Book",
        context! { book, ..Value::from_serialize(&options) },
    )
}

/// Unchecking every genre clears the book's genre set
pub async fn book_update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    match state.services.books.update(id, form).await? {
        FormOutcome::Saved(book) | FormOutcome::Duplicate(book) => Ok(see_other(&book.url())),
        FormOutcome::Invalid { draft, errors } => {
            invalid_book_form(&state, "Update Book", draft, errors).await
        }
    }
}

pub async fn book_delete_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let Some((book, book_instances)) = state.services.books.delete_context(id).await? else {
        return Ok(see_other(LIST_URL));
    };
    Ok(state
        .views
        .render(
            "book_delete.html",
            "Delete Book",
            context! { book, book_instances },
        )?
        .into_response())
}

pub async fn book_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<DeleteBookForm>,
) -> AppResult<Response> {
    let target = delete_target(form.bookid.as_deref(), "bookid")?;
    match state.services.books.delete(id, target).await? {
        DeleteOutcome::Deleted => Ok(see_other(LIST_URL)),
        DeleteOutcome::Blocked { record, dependents } => Ok(state
            .views
            .render(
                "book_delete.html",
                "Delete Book",
                context! { book => record, book_instances => dependents },
            )?
            .into_response()),
    }
}
