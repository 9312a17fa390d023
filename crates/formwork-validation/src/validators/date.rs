//! Date validators

use super::bound::ComparisonBound;
use crate::config::{render, MessageCatalog};
use crate::error::{ValidationError, ValidationResult};
use crate::traits::{is_empty_value, ValidationRule};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a value into a UTC date-time.
///
/// Strings may be RFC 3339, ISO dates or date-times (with or without seconds),
/// or `MM/DD/YYYY`. Numbers are milliseconds since the Unix epoch.
pub fn parse_date(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(s) => parse_date_str(s.trim()),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.naive_utc()),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Validator that requires a parseable date
#[derive(Debug, Clone, Default)]
pub struct DateValidator {
    /// Custom error message
    pub message: Option<String>,
}

impl DateValidator {
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
}

impl ValidationRule for DateValidator {
    fn validate(&self, value: &Value) -> ValidationResult<()> {
        if is_empty_value(value) || parse_date(value).is_some() {
            return Ok(());
        }

        let message = self
            .message
            .clone()
            .unwrap_or_else(|| MessageCatalog::builtin().date.clone());
        Err(ValidationError::with_code(message, "date"))
    }

    fn rule_name(&self) -> &'static str {
        "date"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    After,
    Before,
}

/// Validator that compares a date strictly against another date.
///
/// The input must parse and lie strictly after (or before) the bound; equal
/// dates fail. When the bound is missing or unparseable there is nothing to
/// compare with and the rule passes.
#[derive(Debug, Clone)]
pub struct DateComparisonValidator {
    pub order: DateOrder,
    pub bound: ComparisonBound,
    /// Name of the other field, used in the default message
    pub label: String,
    /// Custom error message
    pub message: Option<String>,
}

impl DateComparisonValidator {
    /// Date must be strictly after `other`, captured now
    pub fn after(other: impl Into<Value>, label: impl Into<String>) -> Self {
        Self::new(DateOrder::After, ComparisonBound::fixed(other), label)
    }

    /// Date must be strictly before `other`, captured now
    pub fn before(other: impl Into<Value>, label: impl Into<String>) -> Self {
        Self::new(DateOrder::Before, ComparisonBound::fixed(other), label)
    }

    pub fn new(order: DateOrder, bound: ComparisonBound, label: impl Into<String>) -> Self {
        Self {
            order,
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

    fn error(&self) -> ValidationError {
        let catalog = MessageCatalog::builtin();
        let template = match self.order {
            DateOrder::After => &catalog.date_after,
            DateOrder::Before => &catalog.date_before,
        };
        let message = self
            .message
            .clone()
            .unwrap_or_else(|| render(template, &[("label", self.label.clone())]));
        ValidationError::with_code(message, self.rule_name())
    }
}

impl ValidationRule for DateComparisonValidator {
    fn validate(&self, value: &Value) -> ValidationResult<()> {
        if is_empty_value(value) {
            return Ok(());
        }

        let Some(date) = parse_date(value) else {
            return Err(self.error());
        };

        let Some(bound) = parse_date(&self.bound.current()) else {
            return Ok(());
        };

        let in_order = match self.order {
            DateOrder::After => date > bound,
            DateOrder::Before => date < bound,
        };

        if in_order {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    fn rule_name(&self) -> &'static str {
        match self.order {
            DateOrder::After => "date_after",
            DateOrder::Before => "date_before",
        }
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "label": self.label,
            "live": self.bound.is_live(),
        }))
    }
}
