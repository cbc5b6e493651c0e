//! Book copy pages

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
    models::{BookInstanceForm, BookInstanceStatus},
    services::{DeleteOutcome, FormOutcome},
    AppState,
};

const LIST_URL: &str = "/catalog/bookinstances";

#[derive(Debug, Deserialize)]
pub struct DeleteBookInstanceForm {
    pub bookinstanceid: Option<String>,
}

fn statuses() -> Vec<&'static str> {
    BookInstanceStatus::ALL.iter().map(|s| s.as_str()).collect()
}

pub async fn bookinstance_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let bookinstance_list = state.services.book_instances.list().await?;
    state.views.render(
        "bookinstance_list.html",
        "Book Instance List",
        context! { bookinstance_list },
    )
}

pub async fn bookinstance_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let entry = state.services.book_instances.detail(id).await?;
    state.views.render(
        "bookinstance_detail.html",
        "Book Instance Detail",
        context! { bookinstance => entry.instance, book => entry.book },
    )
}

pub async fn bookinstance_create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let book_list = state.services.book_instances.books().await?;
    state.views.render(
        "bookinstance_form.html",
        "Create BookInstance",
        context! { book_list, statuses => statuses() },
    )
}

pub async fn bookinstance_create(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    match state.services.book_instances.create(form).await? {
        FormOutcome::Saved(copy) | FormOutcome::Duplicate(copy) => Ok(see_other(&copy.url())),
        FormOutcome::Invalid { draft, errors } => {
            let book_list = state.services.book_instances.books().await?;
            Ok(state
                .views
                .render(
                    "bookinstance_form.html",
                    "Create BookInstance",
                    context! { bookinstance => draft, book_list, statuses => statuses(), errors },
                )?
                .into_response())
        }
    }
}

pub async fn bookinstance_update_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let (bookinstance, book_list) = state.services.book_instances.edit_form(id).await?;
    state.views.render(
        "bookinstance_form.html",
        "Update BookInstance",
        context! { bookinstance, book_list, statuses => statuses() },
    )
}

pub async fn bookinstance_update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    match state.services.book_instances.update(id, form).await? {
        FormOutcome::Saved(copy) | FormOutcome::Duplicate(copy) => Ok(see_other(&copy.url())),
        FormOutcome::Invalid { draft, errors } => {
            let book_list = state.services.book_instances.books().await?;
            Ok(state
                .views
                .render(
                    "bookinstance_form.html",
                    "Update BookInstance",
                    context! { bookinstance => draft, book_list, statuses => statuses(), errors },
                )?
                .into_response())
        }
    }
}

pub async fn bookinstance_delete_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let Some(entry) = state.services.book_instances.delete_context(id).await? else {
        return Ok(see_other(LIST_URL));
    };
    Ok(state
        .views
        .render(
            "bookinstance_delete.html",
            "Delete BookInstance",
            context! { bookinstance => entry.instance, book => entry.book },
        )?
        .into_response())
}

pub async fn bookinstance_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<DeleteBookInstanceForm>,
) -> AppResult<Response> {
    let target = delete_target(form.bookinstanceid.as_deref(), "bookinstanceid")?;
    match state.services.book_instances.delete(id, target).await? {
        DeleteOutcome::Deleted | DeleteOutcome::Blocked { .. } => Ok(see_other(LIST_URL)),
    }
}
