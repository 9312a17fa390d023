//! Rules written as plain functions

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use serde_json::Value;
use std::sync::Arc;

/// Function returning the error message for a value, empty when valid
pub type MessageFn = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Custom validator wrapping a user-defined function.
///
/// The function sees every value, including empty ones, and follows the
/// "empty message means valid" convention.
#[derive(Clone)]
pub struct CustomValidator {
    /// Name/identifier for this custom validator, used as the error code
    pub name: String,
    check: MessageFn,
    /// Custom error message, replacing whatever the function returned
    pub message: Option<String>,
}

impl CustomValidator {
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
            message: None,
        }
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Get the validator name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for CustomValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomValidator")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish()
    }
}

impl ValidationRule for CustomValidator {
    fn validate(&self, value: &Value) -> ValidationResult<()> {
        let message = (self.check)(value);
        if message.is_empty() {
            return Ok(());
        }

        let message = self.message.clone().unwrap_or(message);
        Err(ValidationError::with_code(message, self.name.clone()))
    }

    fn rule_name(&self) -> &'static str {
        "custom"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({ "name": self.name }))
    }
}
