//! Field schemas and the whole-form validator built from them

use crate::error::FormErrors;
use crate::traits::{FormValidator, FormValues, IntoRule, Rule};
use crate::validators::compose::first_failure;
use indexmap::IndexMap;
use serde_json::Value;

/// Rules attached to one field: a single rule or an ordered sequence that
/// stops at the first failure
#[derive(Clone)]
pub enum FieldSchema {
    Single(Rule),
    Sequence(Vec<Rule>),
}

impl FieldSchema {
    /// The message for `value`, empty when every rule passes
    pub fn check(&self, value: &Value) -> String {
        let result = match self {
            FieldSchema::Single(rule) => rule.validate(value),
            FieldSchema::Sequence(rules) => first_failure(rules, value),
        };
        result.err().map(|error| error.message).unwrap_or_default()
    }

    /// Names of the rules in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        match self {
            FieldSchema::Single(rule) => vec![rule.rule_name()],
            FieldSchema::Sequence(rules) => rules.iter().map(|rule| rule.rule_name()).collect(),
        }
    }
}

impl std::fmt::Debug for FieldSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldSchema::Single(_) => f.debug_tuple("Single").field(&self.rule_names()).finish(),
            FieldSchema::Sequence(_) => f.debug_tuple("Sequence").field(&self.rule_names()).finish(),
        }
    }
}

impl<R: IntoRule> From<R> for FieldSchema {
    fn from(rule: R) -> Self {
        FieldSchema::Single(rule.into_rule())
    }
}

/// Field name to rules, evaluated in declaration order.
///
/// Fields that appear in the form values but not here are never validated.
#[derive(Clone, Debug, Default)]
pub struct FormSchema {
    fields: IndexMap<String, FieldSchema>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a single rule to a field, replacing its previous schema
    pub fn field(mut self, name: impl Into<String>, rule: impl IntoRule) -> Self {
        self.fields.insert(name.into(), FieldSchema::Single(rule.into_rule()));
        self
    }

    /// Attach an ordered rule sequence to a field, replacing its previous schema
    pub fn field_rules<I>(mut self, name: impl Into<String>, rules: I) -> Self
    where
        I: IntoIterator<Item = Rule>,
    {
        self.fields
            .insert(name.into(), FieldSchema::Sequence(rules.into_iter().collect()));
        self
    }

    /// Insert an already-built field schema
    pub fn insert(&mut self, name: impl Into<String>, schema: FieldSchema) {
        self.fields.insert(name.into(), schema);
    }

    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }

    /// Field names in evaluation order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate every schema field against `values`.
    ///
    /// A field missing from `values` is checked as `null`. Passing fields are
    /// left out of the result.
    pub fn validate(&self, values: &FormValues) -> FormErrors {
        let mut errors = FormErrors::new();
        for (name, schema) in &self.fields {
            let value = values.get(name).unwrap_or(&Value::Null);
            let message = schema.check(value);
            if !message.is_empty() {
                tracing::trace!(field = %name, error = %message, "field failed validation");
                errors.set(name.clone(), message);
            }
        }
        errors
    }
}

/// Whole-form validator produced by [`create_validator`]
#[derive(Clone, Debug)]
pub struct SchemaValidator {
    schema: FormSchema,
}

impl SchemaValidator {
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }
}

impl FormValidator for SchemaValidator {
    fn validate_form(&self, values: &FormValues) -> FormErrors {
        self.schema.validate(values)
    }
}

/// Turn a schema into a whole-form validator
pub fn create_validator(schema: FormSchema) -> SchemaValidator {
    SchemaValidator { schema }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose;
    use crate::validators::*;
    use serde_json::json;

    fn values(pairs: &[(&str, Value)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_create_validator_reports_each_field() {
        let validator = create_validator(
            FormSchema::new()
                .field("name", required())
                .field("email", compose![required(), email()]),
        );

        let errors = validator.validate_form(&values(&[("name", json!("")), ("email", json!("x"))]));

        assert_eq!(errors.get("name"), Some("This field is required"));
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_sequence_short_circuits() {
        let schema = FormSchema::new().field_rules(
            "password",
            [
                required().into_rule(),
                min_length(8).into_rule(),
                matches("secret-pass", "confirmation").into_rule(),
            ],
        );

        let short = schema.validate(&values(&[("password", json!("abc"))]));
        assert_eq!(short.get("password"), Some("Must be at least 8 characters"));

        let missing = schema.validate(&FormValues::new());
        assert_eq!(missing.get("password"), Some("This field is required"));
    }

    #[test]
    fn test_passing_fields_are_omitted() {
        let schema = FormSchema::new().field("name", required()).field("age", min(18.0));
        let errors = schema.validate(&values(&[("name", json!("Ada")), ("age", json!(36))]));

        assert!(errors.is_empty());
        assert_eq!(errors.raw("name"), None);
    }

    #[test]
    fn test_fields_outside_schema_are_ignored() {
        let schema = FormSchema::new().field("name", required());
        let errors = schema.validate(&values(&[("name", json!("Ada")), ("notes", json!(""))]));

        assert!(errors.is_empty());
    }

    #[test]
    fn test_result_follows_schema_order() {
        let schema = FormSchema::new()
            .field("zeta", required())
            .field("alpha", required())
            .field("mid", required());

        let errors = schema.validate(&FormValues::new());
        let fields: Vec<&str> = errors.iter().map(|(field, _)| field).collect();

        assert_eq!(fields, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_single_field_slice_checks_missing_siblings_as_null() {
        let schema = FormSchema::new()
            .field("name", required())
            .field("email", compose![required(), email()]);

        let errors = schema.validate(&values(&[("email", json!("bad"))]));

        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
        assert_eq!(errors.get("name"), Some("This field is required"));
    }

    #[test]
    fn test_empty_sequence_never_fails() {
        let schema = FormSchema::new().field_rules("anything", Vec::<Rule>::new());
        assert!(schema.validate(&FormValues::new()).is_empty());
    }

    #[test]
    fn test_validation_is_deterministic() {
        let validator = create_validator(
            FormSchema::new()
                .field("email", compose![required(), email()])
                .field("phone", phone_number()),
        );
        let input = values(&[("email", json!("nope")), ("phone", json!("123"))]);

        assert_eq!(validator.validate_form(&input), validator.validate_form(&input));
    }

    #[test]
    fn test_field_schema_debug_lists_rules() {
        let schema: FieldSchema = compose![required(), email()].into();
        assert_eq!(format!("{:?}", schema), r#"Single(["compose"])"#);
        assert_eq!(
            FieldSchema::Sequence(vec![required().into_rule(), email().into_rule()]).rule_names(),
            ["required", "email"]
        );
    }
}
