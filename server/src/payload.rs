//! Request body parsing for todo payloads.
//!
//! The body is taken as an untyped JSON value and checked field by field so
//! that every type problem is reported against the field that caused it.
//! `id` and `created_at` are read-only and unknown keys are ignored.

use serde_json::Value;

use crate::model::TodoFields;
use crate::validation::{
    ValidationErrors, NON_FIELD_ERRORS, NOT_A_BOOLEAN, NOT_A_STRING, NULL,
};

impl TodoFields {
    /// Extracts `title` and `completed` from a JSON request body.
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let Value::Object(map) = body else {
            return Err(ValidationErrors::single(
                NON_FIELD_ERRORS,
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    json_kind(body)
                ),
            ));
        };

        let mut errors = ValidationErrors::new();
        let mut fields = TodoFields::default();

        match map.get("title") {
            None => {}
            Some(Value::String(title)) => fields.title = Some(title.clone()),
            Some(Value::Null) => errors.add("title", NULL),
            Some(_) => errors.add("title", NOT_A_STRING),
        }

        match map.get("completed") {
            None => {}
            Some(Value::Bool(completed)) => fields.completed = Some(*completed),
            Some(Value::Null) => errors.add("completed", NULL),
            Some(_) => errors.add("completed", NOT_A_BOOLEAN),
        }

        errors.into_result()?;
        Ok(fields)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
