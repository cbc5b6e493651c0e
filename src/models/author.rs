//! Author model and related types

use chrono::NaiveDate;
use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::format_date;
use crate::validation;

/// Stored author record
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    pub fn from_draft(id: Uuid, draft: AuthorDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            family_name: draft.family_name,
            date_of_birth: draft.date_of_birth,
            date_of_death: draft.date_of_death,
        }
    }

    /// "family_name, first_name", or empty when either part is missing
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            String::new()
        } else {
            format!("{}, {}", self.family_name, self.first_name)
        }
    }

    pub fn lifespan(&self) -> String {
        format!(
            "{} - {}",
            self.date_of_birth.map(format_date).unwrap_or_default(),
            self.date_of_death.map(format_date).unwrap_or_default(),
        )
    }

    pub fn url(&self) -> String {
        author_url(self.id)
    }
}

pub fn author_url(id: Uuid) -> String {
    format!("/catalog/author/{}", id)
}

// Templates read the derived display fields alongside the stored ones.
impl Serialize for Author {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Author", 8)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("first_name", &self.first_name)?;
        s.serialize_field("family_name", &self.family_name)?;
        s.serialize_field("date_of_birth", &self.date_of_birth)?;
        s.serialize_field("date_of_death", &self.date_of_death)?;
        s.serialize_field("name", &self.name())?;
        s.serialize_field("lifespan", &self.lifespan())?;
        s.serialize_field("url", &self.url())?;
        s.end()
    }
}

/// Sanitized, not yet persisted author
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuthorDraft {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Author create/update form body
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AuthorForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "First name must be specified."),
        custom(
            function = "validation::alphanumeric",
            message = "First name has non-alphanumeric characters"
        )
    )]
    pub first_name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Family name must be specified"),
        custom(
            function = "validation::alphanumeric",
            message = "Family name has non-alphanumeric characters"
        )
    )]
    pub family_name: String,
    #[serde(default)]
    #[validate(custom(function = "validation::iso_date", message = "Invalid date of birth"))]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validation::iso_date", message = "Invalid date of death"))]
    pub date_of_death: Option<String>,
}

impl AuthorForm {
    const FIELDS: &'static [&'static str] =
        &["first_name", "family_name", "date_of_birth", "date_of_death"];

    /// Trim, check and escape; returns the draft and any error messages.
    pub fn into_draft(mut self) -> (AuthorDraft, Vec<String>) {
        validation::trim_in_place(&mut self.first_name);
        validation::trim_in_place(&mut self.family_name);
        validation::trim_optional(&mut self.date_of_birth);
        validation::trim_optional(&mut self.date_of_death);

        let errors = validation::collect_messages(self.validate(), Self::FIELDS);
        let draft = AuthorDraft {
            first_name: validation::escape(&self.first_name),
            family_name: validation::escape(&self.family_name),
            date_of_birth: self.date_of_birth.as_deref().and_then(validation::parse_iso_date),
            date_of_death: self.date_of_death.as_deref().and_then(validation::parse_iso_date),
        };
        (draft, errors)
    }
}
