//! Field sanitizers and validators shared by the catalog forms.
//!
//! Form payloads derive [`validator::Validate`] over their *trimmed* values;
//! drafts are then built from the escaped values. Error messages are collected
//! in field declaration order so forms list them the way they are laid out.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate};
use validator::{ValidationError, ValidationErrors};

/// Escape HTML-significant characters.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            c => out.push(c),
        }
    }
    out
}

/// Trim every string field in place.
pub fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Trim an optional field; blank values become `None`.
pub fn trim_optional(value: &mut Option<String>) {
    if let Some(v) = value.as_mut() {
        trim_in_place(v);
    }
    if value.as_deref().is_some_and(str::is_empty) {
        *value = None;
    }
}

/// Parse an ISO-8601 calendar date (`2021-03-04`) or an RFC 3339 timestamp.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|d| d.date_naive()))
}

/// `Validate` hook for optional date fields
pub fn iso_date(value: &str) -> Result<(), ValidationError> {
    match parse_iso_date(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("iso8601")),
    }
}

/// `Validate` hook: ASCII letters and digits only, at least one character.
pub fn alphanumeric(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ValidationError::new("alphanumeric"))
    }
}

/// `Validate` hook for reference fields carrying a record id.
pub fn record_id(value: &str) -> Result<(), ValidationError> {
    uuid::Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("record_id"))
}

/// Flatten validator errors into messages, ordered by `fields`.
///
/// Each field keeps at most one copy of a message, so a value failing two
/// checks that share a message reports it once.
pub fn collect_messages(result: Result<(), ValidationErrors>, fields: &[&str]) -> Vec<String> {
    let Err(errors) = result else {
        return Vec::new();
    };
    let by_field = errors.field_errors();
    let mut messages = Vec::new();
    for field in fields {
        let Some(field_errors) = by_field.get(*field) else {
            continue;
        };
        let mut seen: Vec<Cow<'static, str>> = Vec::new();
        for err in field_errors.iter() {
            let message = err
                .message
                .clone()
                .unwrap_or_else(|| Cow::Owned(format!("{} is invalid", field)));
            if !seen.contains(&message) {
                messages.push(message.to_string());
                seen.push(message);
            }
        }
    }
    messages
}
