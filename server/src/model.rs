//! The todo record and the input used to create or change one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{ValidationErrors, BLANK, REQUIRED};

/// Longest title accepted, counted in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// A persisted todo as returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied todo fields. Absent fields are `None`.
///
/// On create, a missing `completed` means `false`. On update, a missing field
/// means "leave it as it is".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoFields {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl TodoFields {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            completed: None,
        }
    }

    pub fn with_completed(completed: bool) -> Self {
        Self {
            title: None,
            completed: Some(completed),
        }
    }

    /// Validates the fields for a new record and returns the cleaned title
    /// and completion flag.
    pub(crate) fn for_create(self) -> Result<(String, bool), ValidationErrors> {
        let Some(title) = self.title else {
            return Err(ValidationErrors::single("title", REQUIRED));
        };
        let title = clean_title(&title)?;
        Ok((title, self.completed.unwrap_or(false)))
    }

    /// Validates the fields for a partial update. Supplied titles come back
    /// trimmed.
    pub(crate) fn for_update(self) -> Result<Self, ValidationErrors> {
        let title = self.title.as_deref().map(clean_title).transpose()?;
        Ok(Self {
            title,
            completed: self.completed,
        })
    }
}

fn clean_title(raw: &str) -> Result<String, ValidationErrors> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ValidationErrors::single("title", BLANK));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(ValidationErrors::single(
            "title",
            format!("Ensure this field has no more than {TITLE_MAX_CHARS} characters."),
        ));
    }
    Ok(title.to_string())
}
