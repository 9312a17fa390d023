//! Numeric value validators

use crate::config::{render, MessageCatalog};
use crate::error::{ValidationError, ValidationResult};
use crate::traits::{is_empty_value, ValidationRule};
use serde_json::Value;

/// Coerce a value to a finite number.
///
/// JSON numbers are taken as-is, strings are trimmed and parsed (a blank
/// string reads as zero), booleans read as 1 and 0. Anything else, or a
/// non-finite result, is not a number.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(num) => num.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Validator for numeric input with optional inclusive bounds.
///
/// Without bounds it only checks that the value is a number. With a bound, a
/// value that is not a number fails with the bound's message.
#[derive(Debug, Clone, Default)]
pub struct NumericValidator {
    /// Minimum value (inclusive)
    pub min: Option<f64>,
    /// Maximum value (inclusive)
    pub max: Option<f64>,
    /// Custom error message
    pub message: Option<String>,
}

impl NumericValidator {
    /// Create a new numeric validator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum value constraint
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set maximum value constraint
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn min_error(&self, min: f64) -> ValidationError {
        let message = self
            .message
            .clone()
            .unwrap_or_else(|| render(&MessageCatalog::builtin().min, &[("min", min.to_string())]));
        ValidationError::with_code(message, "min")
    }

    fn max_error(&self, max: f64) -> ValidationError {
        let message = self
            .message
            .clone()
            .unwrap_or_else(|| render(&MessageCatalog::builtin().max, &[("max", max.to_string())]));
        ValidationError::with_code(message, "max")
    }

    fn not_a_number(&self) -> ValidationError {
        match (self.min, self.max) {
            (Some(min), _) => self.min_error(min),
            (None, Some(max)) => self.max_error(max),
            (None, None) => {
                let message = self
                    .message
                    .clone()
                    .unwrap_or_else(|| MessageCatalog::builtin().number.clone());
                ValidationError::with_code(message, "number")
            }
        }
    }
}

impl ValidationRule for NumericValidator {
    fn validate(&self, value: &Value) -> ValidationResult<()> {
        if is_empty_value(value) {
            return Ok(());
        }

        let Some(number) = coerce_number(value) else {
            return Err(self.not_a_number());
        };

        if let Some(min) = self.min {
            if number < min {
                return Err(self.min_error(min));
            }
        }

        if let Some(max) = self.max {
            if number > max {
                return Err(self.max_error(max));
            }
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        match (self.min, self.max) {
            (Some(_), None) => "min",
            (None, Some(_)) => "max",
            (None, None) => "number",
            (Some(_), Some(_)) => "range",
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
