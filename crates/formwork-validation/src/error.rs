//! Validation error types and the per-form error map

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// A single rule failure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Human-readable error message shown next to the field
    pub message: String,
    /// Error code for programmatic handling, usually the rule name
    pub code: String,
}

impl ValidationError {
    /// Create a new validation error with the generic code
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: "validation_failed".to_string(),
        }
    }

    /// Create a validation error with a specific code
    pub fn with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Current error message per field.
///
/// A missing key and an empty message both mean "no error"; the form
/// controller clears a field by storing `""` rather than removing the key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FormErrors {
    errors: IndexMap<String, String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the message for a field, replacing any previous one
    pub fn set(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    /// Blank out the message of a field that currently has one.
    ///
    /// Returns true when a non-empty message was cleared.
    pub fn clear_field(&mut self, field: &str) -> bool {
        match self.errors.get_mut(field) {
            Some(message) if !message.is_empty() => {
                message.clear();
                true
            }
            _ => false,
        }
    }

    /// Get the error message of a field, `None` when it has no error
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .get(field)
            .map(String::as_str)
            .filter(|message| !message.is_empty())
    }

    /// Raw entry for a field, including blanked messages
    pub fn raw(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// True when no field carries a non-empty message
    pub fn is_empty(&self) -> bool {
        self.errors.values().all(String::is_empty)
    }

    /// Number of fields with a non-empty message
    pub fn len(&self) -> usize {
        self.errors.values().filter(|m| !m.is_empty()).count()
    }

    /// Iterate over fields with a non-empty message, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .filter(|(_, message)| !message.is_empty())
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// Copy every non-empty message of `other` into this map
    pub fn merge(&mut self, other: FormErrors) {
        for (field, message) in other.errors {
            if !message.is_empty() {
                self.errors.insert(field, message);
            }
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "No validation errors")
        } else {
            write!(f, "Validation failed for {} field(s):", self.len())?;
            for (field, message) in self.iter() {
                write!(f, "\n  {}: {}", field, message)?;
            }
            Ok(())
        }
    }
}

impl<K, V> FromIterator<(K, V)> for FormErrors
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            errors: iter
                .into_iter()
                .map(|(field, message)| (field.into(), message.into()))
                .collect(),
        }
    }
}

/// Problems found while turning a declarative schema into rules
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("Rule '{rule}' on field '{field}' requires a '{parameter}' parameter")]
    MissingParameter {
        field: String,
        rule: String,
        parameter: String,
    },

    #[error("Rule '{rule}' on field '{field}' has an invalid '{parameter}': {reason}")]
    InvalidParameter {
        field: String,
        rule: String,
        parameter: String,
        reason: String,
    },
}

/// Errors raised while loading configuration documents
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_creation() {
        let error = ValidationError::new("Invalid email format");
        assert_eq!(error.message, "Invalid email format");
        assert_eq!(error.code, "validation_failed");
        assert_eq!(error.to_string(), "Invalid email format");
    }

    #[test]
    fn test_validation_error_with_code() {
        let error = ValidationError::with_code("Must be positive", "min");
        assert_eq!(error.code, "min");
    }

    #[test]
    fn test_form_errors_empty_message_means_no_error() {
        let mut errors = FormErrors::new();
        errors.set("email", "");
        errors.set("name", "This field is required");

        assert!(!errors.has_error("email"));
        assert_eq!(errors.raw("email"), Some(""));
        assert_eq!(errors.get("name"), Some("This field is required"));
        assert_eq!(errors.len(), 1);
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_clear_field_only_touches_that_field() {
        let mut errors: FormErrors =
            [("email", "Bad email"), ("name", "Required")].into_iter().collect();

        assert!(errors.clear_field("email"));
        assert!(!errors.clear_field("email"));
        assert!(!errors.clear_field("phone"));

        assert_eq!(errors.raw("email"), Some(""));
        assert_eq!(errors.get("name"), Some("Required"));
        assert_eq!(errors.raw("phone"), None);
    }

    #[test]
    fn test_merge_skips_blank_messages() {
        let mut errors: FormErrors = [("name", "Required")].into_iter().collect();
        let other: FormErrors = [("name", ""), ("email", "Bad email")].into_iter().collect();

        errors.merge(other);

        assert_eq!(errors.get("name"), Some("Required"));
        assert_eq!(errors.get("email"), Some("Bad email"));
    }

    #[test]
    fn test_display_lists_fields() {
        let errors: FormErrors = [("email", "Bad email")].into_iter().collect();
        assert_eq!(
            errors.to_string(),
            "Validation failed for 1 field(s):\n  email: Bad email"
        );
        assert_eq!(FormErrors::new().to_string(), "No validation errors");
    }
}
