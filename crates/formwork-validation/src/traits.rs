//! Core validation traits

use crate::error::{FormErrors, ValidationResult};
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

/// Current value of every field in a form, keyed by field name
pub type FormValues = IndexMap<String, Value>;

/// Shareable handle to a rule, as stored in schemas and combinators
pub type Rule = Arc<dyn ValidationRule>;

/// A pure check of a single field value.
///
/// Rules must be deterministic and must not panic: malformed input is reported
/// as a `ValidationError`, never as a crash.
pub trait ValidationRule: Send + Sync {
    /// Validate a single value; a missing field is passed as `Value::Null`
    fn validate(&self, value: &Value) -> ValidationResult<()>;

    /// Get the validation rule name/type
    fn rule_name(&self) -> &'static str;

    /// Get validation rule parameters/configuration as JSON
    fn parameters(&self) -> Option<Value> {
        None
    }

    /// The failure message for `value`, or an empty string when it is valid
    fn error_message(&self, value: &Value) -> String {
        match self.validate(value) {
            Ok(()) => String::new(),
            Err(error) => error.message,
        }
    }
}

/// Conversion into the shared [`Rule`] handle
pub trait IntoRule {
    fn into_rule(self) -> Rule;
}

impl<R: ValidationRule + 'static> IntoRule for R {
    fn into_rule(self) -> Rule {
        Arc::new(self)
    }
}

impl IntoRule for Rule {
    fn into_rule(self) -> Rule {
        self
    }
}

/// Whole-form validation: values in, per-field messages out
pub trait FormValidator: Send + Sync {
    fn validate_form(&self, values: &FormValues) -> FormErrors;
}

impl<F> FormValidator for F
where
    F: Fn(&FormValues) -> FormErrors + Send + Sync,
{
    fn validate_form(&self, values: &FormValues) -> FormErrors {
        self(values)
    }
}

/// Missing, null and empty-string values are "empty".
///
/// Every rule except `required` lets empty values through.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use serde_json::json;

    struct NoDigits;

    impl ValidationRule for NoDigits {
        fn validate(&self, value: &Value) -> ValidationResult<()> {
            match value.as_str() {
                Some(s) if s.chars().any(|c| c.is_ascii_digit()) => {
                    Err(ValidationError::with_code("No digits allowed", "no_digits"))
                }
                _ => Ok(()),
            }
        }

        fn rule_name(&self) -> &'static str {
            "no_digits"
        }
    }

    #[test]
    fn test_error_message_is_empty_when_valid() {
        assert_eq!(NoDigits.error_message(&json!("abc")), "");
        assert_eq!(NoDigits.error_message(&json!("abc1")), "No digits allowed");
    }

    #[test]
    fn test_rule_handle_delegates() {
        let rule = NoDigits.into_rule();
        assert_eq!(rule.rule_name(), "no_digits");
        assert!(rule.validate(&json!("42")).is_err());
    }

    #[test]
    fn test_closure_form_validator() {
        let validator = |values: &FormValues| {
            let mut errors = FormErrors::new();
            if values.get("name").is_none() {
                errors.set("name", "missing");
            }
            errors
        };

        let errors = validator.validate_form(&FormValues::new());
        assert_eq!(errors.get("name"), Some("missing"));
    }

    #[test]
    fn test_is_empty_value() {
        assert!(is_empty_value(&Value::Null));
        assert!(is_empty_value(&json!("")));
        assert!(!is_empty_value(&json!(" ")));
        assert!(!is_empty_value(&json!(0)));
        assert!(!is_empty_value(&json!(false)));
    }
}
