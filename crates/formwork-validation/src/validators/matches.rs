//! Equality with another value

use super::bound::ComparisonBound;
use crate::config::{render, MessageCatalog};
use crate::error::{ValidationError, ValidationResult};
use crate::traits::{is_empty_value, ValidationRule};
use serde_json::Value;

/// Validator requiring exact equality with another value, such as a
/// password confirmation. No type coercion: `"1"` does not match `1`.
#[derive(Debug, Clone)]
pub struct MatchesValidator {
    pub bound: ComparisonBound,
    /// Name of the other field, used in the default message
    pub label: String,
    /// Custom error message
    pub message: Option<String>,
}

impl MatchesValidator {
    /// Match `other`, captured now
    pub fn new(other: impl Into<Value>, label: impl Into<String>) -> Self {
        Self::with_bound(ComparisonBound::fixed(other), label)
    }

    pub fn with_bound(bound: ComparisonBound, label: impl Into<String>) -> Self {
        Self {
            bound,
            label: label.into(),
            message: None,
        }
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ValidationRule for MatchesValidator {
    fn validate(&self, value: &Value) -> ValidationResult<()> {
        if is_empty_value(value) || *value == self.bound.current() {
            return Ok(());
        }

        let message = self.message.clone().unwrap_or_else(|| {
            render(&MessageCatalog::builtin().matches, &[("label", self.label.clone())])
        });
        Err(ValidationError::with_code(message, "matches"))
    }

    fn rule_name(&self) -> &'static str {
        "matches"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "label": self.label,
            "live": self.bound.is_live(),
        }))
    }
}
