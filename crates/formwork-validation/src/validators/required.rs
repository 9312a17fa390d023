//! Required field validator

use crate::config::MessageCatalog;
use crate::error::{ValidationError, ValidationResult};
use crate::traits::{is_empty_value, ValidationRule};
use serde_json::Value;

/// Validator that ensures a field is present and not empty.
///
/// Only a missing value, `null` and `""` fail; `0`, `false` and whitespace
/// count as present so numeric and boolean fields can be required.
#[derive(Debug, Clone, Default)]
pub struct RequiredValidator {
    /// Custom error message
    pub message: Option<String>,
}

impl RequiredValidator {
    /// Create a new required validator with default message
    pub fn new() -> Self {
        Self { message: None }
    }

    /// Create a required validator with custom message
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ValidationRule for RequiredValidator {
    fn validate(&self, value: &Value) -> ValidationResult<()> {
        if is_empty_value(value) {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| MessageCatalog::builtin().required.clone());

            Err(ValidationError::with_code(message, "required"))
        } else {
            Ok(())
        }
    }

    fn rule_name(&self) -> &'static str {
        "required"
    }

    fn parameters(&self) -> Option<Value> {
        self.message.as_ref().map(|msg| {
            serde_json::json!({
                "message": msg
            })
        })
    }
}
