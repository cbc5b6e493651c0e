//! Genre model

use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validation;

/// Stored genre record
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    pub fn from_draft(id: Uuid, draft: GenreDraft) -> Self {
        Self { id, name: draft.name }
    }

    pub fn url(&self) -> String {
        genre_url(self.id)
    }
}

pub fn genre_url(id: Uuid) -> String {
    format!("/catalog/genre/{}", id)
}

impl Serialize for Genre {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Genre", 3)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("url", &self.url())?;
        s.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenreDraft {
    pub name: String,
}

/// Genre create/update form body
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GenreForm {
    #[serde(default)]
    #[validate(length(min = 3, message = "genre name must contain at least 3 characters"))]
    pub name: String,
}

impl GenreForm {
    pub fn into_draft(mut self) -> (GenreDraft, Vec<String>) {
        validation::trim_in_place(&mut self.name);
        let errors = validation::collect_messages(self.validate(), &["name"]);
        let draft = GenreDraft {
            name: validation::escape(&self.name),
        };
        (draft, errors)
    }
}
