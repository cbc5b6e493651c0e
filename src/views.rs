//! HTML page rendering
//!
//! Templates live as standalone files under `templates/` and are compiled into
//! the binary. Every page extends `layout.html` and receives `title` plus its
//! own context.
//!
//! Auto-escaping is off: free-text fields are HTML-escaped once when a form is
//! sanitized, so stored values are already safe to emit.

use axum::response::Html;
use minijinja::{context, AutoEscape, Environment, UndefinedBehavior, Value};

use crate::error::AppResult;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("author_list.html", include_str!("../templates/author_list.html")),
    ("author_detail.html", include_str!("../templates/author_detail.html")),
    ("author_form.html", include_str!("../templates/author_form.html")),
    ("author_delete.html", include_str!("../templates/author_delete.html")),
    ("book_list.html", include_str!("../templates/book_list.html")),
    ("book_detail.html", include_str!("../templates/book_detail.html")),
    ("book_form.html", include_str!("../templates/book_form.html")),
    ("book_delete.html", include_str!("../templates/book_delete.html")),
    ("genre_list.html", include_str!("../templates/genre_list.html")),
    ("genre_detail.html", include_str!("../templates/genre_detail.html")),
    ("genre_form.html", include_str!("../templates/genre_form.html")),
    ("genre_delete.html", include_str!("../templates/genre_delete.html")),
    ("bookinstance_list.html", include_str!("../templates/bookinstance_list.html")),
    ("bookinstance_detail.html", include_str!("../templates/bookinstance_detail.html")),
    ("bookinstance_form.html", include_str!("../templates/bookinstance_form.html")),
    ("bookinstance_delete.html", include_str!("../templates/bookinstance_delete.html")),
];

/// Compiled page templates
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        // Create forms read fields of a record that does not exist yet.
        env.set_undefined_behavior(UndefinedBehavior::Chainable);
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Render `name` with `ctx` merged under the page title
    pub fn render(&self, name: &str, title: &str, ctx: Value) -> AppResult<Html<String>> {
        let template = self.env.get_template(name)?;
        let body = template.render(context! { title => title, ..ctx })?;
        Ok(Html(body))
    }
}
