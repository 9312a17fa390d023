//! Phone number validator

use super::text_of;
use crate::config::MessageCatalog;
use crate::error::{ValidationError, ValidationResult};
use crate::traits::{is_empty_value, ValidationRule};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s()\-]").expect("valid separator regex"));
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("valid phone regex"));

/// Validator for phone numbers: an optional `+` and 10 to 15 digits once
/// spaces, parentheses and hyphens are removed
#[derive(Debug, Clone, Default)]
pub struct PhoneNumberValidator {
    /// Custom error message
    pub message: Option<String>,
}

impl PhoneNumberValidator {
    pub fn new() -> Self {
        Self { message: None }
    }

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

    /// Strip formatting characters and check the remaining digits
    pub fn is_valid_phone(phone: &str) -> bool {
        let digits = SEPARATORS.replace_all(phone, "");
        PHONE_PATTERN.is_match(&digits)
    }
}

impl ValidationRule for PhoneNumberValidator {
    fn validate(&self, value: &Value) -> ValidationResult<()> {
        if is_empty_value(value) {
            return Ok(());
        }

        let valid = text_of(value)
            .map(|phone| Self::is_valid_phone(&phone))
            .unwrap_or(false);

        if valid {
            Ok(())
        } else {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| MessageCatalog::builtin().phone_number.clone());
            Err(ValidationError::with_code(message, "phone_number"))
        }
    }

    fn rule_name(&self) -> &'static str {
        "phone_number"
    }
}
