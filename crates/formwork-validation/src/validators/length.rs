//! Length-based validators for strings and collections

use crate::config::{render, MessageCatalog};
use crate::error::{ValidationError, ValidationResult};
use crate::traits::{is_empty_value, ValidationRule};
use serde_json::Value;

/// Validator for string/array length constraints
#[derive(Debug, Clone, Default)]
pub struct LengthValidator {
    /// Minimum length (inclusive)
    pub min: Option<usize>,
    /// Maximum length (inclusive)
    pub max: Option<usize>,
    /// Custom error message
    pub message: Option<String>,
}

impl LengthValidator {
    /// Create a new length validator with no constraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum length constraint
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    /// Set maximum length constraint
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Length of a value: characters of a string or of a number's decimal
    /// form, elements of an array. Booleans and objects have no length.
    fn get_length(value: &Value) -> Option<usize> {
        match value {
            Value::String(s) => Some(s.chars().count()),
            Value::Number(n) => Some(n.to_string().chars().count()),
            Value::Array(arr) => Some(arr.len()),
            _ => None,
        }
    }

    fn fail(&self, template: &str, params: &[(&str, String)], code: &str) -> ValidationError {
        let message = self
            .message
            .clone()
            .unwrap_or_else(|| render(template, params));
        ValidationError::with_code(message, code)
    }
}

impl ValidationRule for LengthValidator {
    fn validate(&self, value: &Value) -> ValidationResult<()> {
        if is_empty_value(value) {
            return Ok(());
        }

        let Some(length) = Self::get_length(value) else {
            return Ok(());
        };

        let catalog = MessageCatalog::builtin();

        if let Some(min) = self.min {
            if length < min {
                return Err(self.fail(&catalog.min_length, &[("min", min.to_string())], "min_length"));
            }
        }

        if let Some(max) = self.max {
            if length > max {
                return Err(self.fail(&catalog.max_length, &[("max", max.to_string())], "max_length"));
            }
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        match (self.min, self.max) {
            (Some(_), None) => "min_length",
            (None, Some(_)) => "max_length",
            _ => "length",
        }
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        if let Some(min) = self.min {
            params.insert("min".to_string(), Value::from(min));
        }
        if let Some(max) = self.max {
            params.insert("max".to_string(), Value::from(max));
        }
        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }

        if params.is_empty() {
            None
        } else {
            Some(Value::Object(params))
        }
    }
}
