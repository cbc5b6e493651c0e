//! Book instance (physical copy) model and related types

use chrono::NaiveDate;
use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{book::Book, format_date};
use crate::validation;

/// Copy availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Available,
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

impl std::fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookInstanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown book instance status '{}'", s))
    }
}

impl TryFrom<String> for BookInstanceStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Stored copy record
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct BookInstance {
    pub id: Uuid,
    /// Book id
    #[sqlx(rename = "book_id")]
    pub book: Uuid,
    pub imprint: String,
    #[sqlx(try_from = "String")]
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn from_draft(id: Uuid, draft: BookInstanceDraft) -> Self {
        Self {
            id,
            book: draft.book,
            imprint: draft.imprint,
            status: draft.status,
            due_back: draft.due_back,
        }
    }

    pub fn due_back_formatted(&self) -> String {
        self.due_back.map(format_date).unwrap_or_default()
    }

    pub fn url(&self) -> String {
        book_instance_url(self.id)
    }
}

pub fn book_instance_url(id: Uuid) -> String {
    format!("/catalog/bookinstance/{}", id)
}

impl Serialize for BookInstance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("BookInstance", 7)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("book", &self.book)?;
        s.serialize_field("imprint", &self.imprint)?;
        s.serialize_field("status", &self.status)?;
        s.serialize_field("due_back", &self.due_back)?;
        s.serialize_field("due_back_formatted", &self.due_back_formatted())?;
        s.serialize_field("url", &self.url())?;
        s.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookInstanceDraft {
    pub book: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

fn known_status(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<BookInstanceStatus>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("status"))
}

/// Book instance create/update form body
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BookInstanceForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Book must be specified"),
        custom(function = "validation::record_id", message = "Book must be specified")
    )]
    pub book: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    #[serde(default)]
    #[validate(custom(function = "known_status", message = "Invalid status"))]
    pub status: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validation::iso_date", message = "Invalid date"))]
    pub due_back: Option<String>,
}

impl BookInstanceForm {
    const FIELDS: &'static [&'static str] = &["book", "imprint", "status", "due_back"];

    pub fn into_draft(mut self) -> (BookInstanceDraft, Vec<String>) {
        validation::trim_in_place(&mut self.book);
        validation::trim_in_place(&mut self.imprint);
        validation::trim_optional(&mut self.status);
        validation::trim_optional(&mut self.due_back);

        let errors = validation::collect_messages(self.validate(), Self::FIELDS);
        let draft = BookInstanceDraft {
            book: Uuid::parse_str(&self.book).unwrap_or_default(),
            imprint: validation::escape(&self.imprint),
            status: self
                .status
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            due_back: self.due_back.as_deref().and_then(validation::parse_iso_date),
        };
        (draft, errors)
    }
}

/// Copy with its book resolved
#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceEntry {
    pub instance: BookInstance,
    pub book: Option<Book>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> BookInstanceForm {
        BookInstanceForm {
            book: Uuid::new_v4().to_string(),
            imprint: "Allen & Unwin, 1937".into(),
            status: Some("Loaned".into()),
            due_back: Some("2024-05-01".into()),
        }
    }

    #[test]
    fn valid_instance_draft() {
        let (draft, errors) = valid_form().into_draft();
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(draft.status, BookInstanceStatus::Loaned);
        assert_eq!(draft.imprint, "Allen &amp; Unwin, 1937");
        assert_eq!(draft.due_back, NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[test]
    fn missing_status_defaults_to_maintenance() {
        let mut form = valid_form();
        form.status = None;
        let (draft, errors) = form.into_draft();
        assert!(errors.is_empty());
        assert_eq!(draft.status, BookInstanceStatus::Maintenance);
    }

    #[test]
    fn rejects_unknown_status_and_bad_date() {
        let mut form = valid_form();
        form.status = Some("Lost".into());
        form.due_back = Some("next week".into());
        let (_, errors) = form.into_draft();
        assert_eq!(errors, vec!["Invalid status", "Invalid date"]);
    }

    #[test]
    fn requires_book_and_imprint() {
        let (_, errors) = BookInstanceForm::default().into_draft();
        assert_eq!(errors, vec!["Book must be specified", "Imprint must be specified"]);
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in BookInstanceStatus::ALL {
            assert_eq!(BookInstanceStatus::try_from(status.to_string()), Ok(status));
        }
        assert!("available".parse::<BookInstanceStatus>().is_err());
    }
}
