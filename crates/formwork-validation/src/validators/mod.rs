//! Built-in validators and the factory functions used to declare schemas

pub mod bound;
pub mod compose;
pub mod custom;
pub mod date;
pub mod email;
pub mod length;
pub mod matches;
pub mod numeric;
pub mod phone;
pub mod required;

pub use bound::ComparisonBound;
pub use compose::Compose;
pub use custom::CustomValidator;
pub use date::{DateComparisonValidator, DateOrder, DateValidator};
pub use email::EmailValidator;
pub use length::LengthValidator;
pub use matches::MatchesValidator;
pub use numeric::NumericValidator;
pub use phone::PhoneNumberValidator;
pub use required::RequiredValidator;

use crate::traits::Rule;
use serde_json::Value;

/// Text form of a scalar value; arrays and objects have none
pub(crate) fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn required() -> RequiredValidator {
    RequiredValidator::new()
}

pub fn email() -> EmailValidator {
    EmailValidator::new()
}

pub fn phone_number() -> PhoneNumberValidator {
    PhoneNumberValidator::new()
}

pub fn min_length(min: usize) -> LengthValidator {
    LengthValidator::new().min(min)
}

pub fn max_length(max: usize) -> LengthValidator {
    LengthValidator::new().max(max)
}

pub fn number() -> NumericValidator {
    NumericValidator::new()
}

pub fn min(min: f64) -> NumericValidator {
    NumericValidator::new().min(min)
}

pub fn max(max: f64) -> NumericValidator {
    NumericValidator::new().max(max)
}

pub fn date() -> DateValidator {
    DateValidator::new()
}

/// Strictly after `other`, which is captured now and not re-read
pub fn date_after(other: impl Into<Value>, label: impl Into<String>) -> DateComparisonValidator {
    DateComparisonValidator::after(other, label)
}

/// Strictly before `other`, which is captured now and not re-read
pub fn date_before(other: impl Into<Value>, label: impl Into<String>) -> DateComparisonValidator {
    DateComparisonValidator::before(other, label)
}

/// Equal to `other`, which is captured now and not re-read
pub fn matches(other: impl Into<Value>, label: impl Into<String>) -> MatchesValidator {
    MatchesValidator::new(other, label)
}

/// Compose already-shared rules; see also the [`compose!`](crate::compose) macro
pub fn compose<I>(rules: I) -> Compose
where
    I: IntoIterator<Item = Rule>,
{
    rules.into_iter().collect()
}

/// Build a [`Compose`] from rules of any type, in order
#[macro_export]
macro_rules! compose {
    ($($rule:expr),* $(,)?) => {
        $crate::validators::Compose::new()$(.rule($rule))*
    };
}
