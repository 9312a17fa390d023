//! Email format validator

use super::text_of;
use crate::config::MessageCatalog;
use crate::error::{ValidationError, ValidationResult};
use crate::traits::{is_empty_value, ValidationRule};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// local@domain.tld: no spaces or '@' in local/domain, alphabetic tld of 2+ chars
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[^\s@]+@[^\s@]+\.[a-z]{2,}$").expect("valid email regex"));

/// Validator for email address format
#[derive(Debug, Clone, Default)]
pub struct EmailValidator {
    /// Custom error message
    pub message: Option<String>,
}

impl EmailValidator {
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

    /// Check an address against the email shape
    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_PATTERN.is_match(email)
    }
}

impl ValidationRule for EmailValidator {
    fn validate(&self, value: &Value) -> ValidationResult<()> {
        if is_empty_value(value) {
            return Ok(());
        }

        let valid = text_of(value)
            .map(|email| Self::is_valid_email(&email))
            .unwrap_or(false);

        if valid {
            Ok(())
        } else {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| MessageCatalog::builtin().email.clone());
            Err(ValidationError::with_code(message, "email"))
        }
    }

    fn rule_name(&self) -> &'static str {
        "email"
    }
}
