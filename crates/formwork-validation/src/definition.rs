//! Schemas declared as data (YAML or JSON) instead of code

use crate::config::{render, MessageCatalog};
use crate::error::{ConfigError, SchemaError};
use crate::schema::{FieldSchema, FormSchema};
use crate::traits::{IntoRule, Rule};
use crate::validators::date::parse_date;
use crate::validators::*;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Built-in rule names usable in a definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Required,
    Email,
    PhoneNumber,
    MinLength,
    MaxLength,
    Number,
    Min,
    Max,
    Date,
    DateAfter,
    DateBefore,
    Matches,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::Email => "email",
            RuleKind::PhoneNumber => "phone_number",
            RuleKind::MinLength => "min_length",
            RuleKind::MaxLength => "max_length",
            RuleKind::Number => "number",
            RuleKind::Min => "min",
            RuleKind::Max => "max",
            RuleKind::Date => "date",
            RuleKind::DateAfter => "date_after",
            RuleKind::DateBefore => "date_before",
            RuleKind::Matches => "matches",
        }
    }
}

/// One rule with its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub rule: RuleKind,
    /// Bound for length/number rules, comparison value for cross-field rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Name of the compared field for cross-field rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Message replacing the catalog default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A field takes either one rule or an ordered list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldDefinition {
    Single(RuleDefinition),
    Sequence(Vec<RuleDefinition>),
}

/// Declarative form schema.
///
/// ```yaml
/// fields:
///   email:
///     - rule: required
///     - rule: email
///   password:
///     rule: min_length
///     value: 8
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    #[serde(default)]
    pub fields: IndexMap<String, FieldDefinition>,
}

impl SchemaDefinition {
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Build the schema, filling default messages from `catalog`
    pub fn build(&self, catalog: &MessageCatalog) -> Result<FormSchema, SchemaError> {
        let mut schema = FormSchema::new();
        for (field, definition) in &self.fields {
            let field_schema = match definition {
                FieldDefinition::Single(rule) => FieldSchema::Single(build_rule(field, rule, catalog)?),
                FieldDefinition::Sequence(rules) => FieldSchema::Sequence(
                    rules
                        .iter()
                        .map(|rule| build_rule(field, rule, catalog))
                        .collect::<Result<Vec<_>, _>>()?,
                ),
            };
            schema.insert(field.clone(), field_schema);
        }
        tracing::debug!(fields = schema.len(), "built form schema from definition");
        Ok(schema)
    }
}

fn build_rule(field: &str, def: &RuleDefinition, catalog: &MessageCatalog) -> Result<Rule, SchemaError> {
    let rule: Rule = match def.rule {
        RuleKind::Required => required()
            .message(message_or(def, &catalog.required, &[]))
            .into_rule(),
        RuleKind::Email => email().message(message_or(def, &catalog.email, &[])).into_rule(),
        RuleKind::PhoneNumber => phone_number()
            .message(message_or(def, &catalog.phone_number, &[]))
            .into_rule(),
        RuleKind::MinLength => {
            let bound = length_param(field, def)?;
            min_length(bound)
                .message(message_or(def, &catalog.min_length, &[("min", bound.to_string())]))
                .into_rule()
        }
        RuleKind::MaxLength => {
            let bound = length_param(field, def)?;
            max_length(bound)
                .message(message_or(def, &catalog.max_length, &[("max", bound.to_string())]))
                .into_rule()
        }
        RuleKind::Number => number().message(message_or(def, &catalog.number, &[])).into_rule(),
        RuleKind::Min => {
            let bound = number_param(field, def)?;
            min(bound)
                .message(message_or(def, &catalog.min, &[("min", bound.to_string())]))
                .into_rule()
        }
        RuleKind::Max => {
            let bound = number_param(field, def)?;
            max(bound)
                .message(message_or(def, &catalog.max, &[("max", bound.to_string())]))
                .into_rule()
        }
        RuleKind::Date => date().message(message_or(def, &catalog.date, &[])).into_rule(),
        RuleKind::DateAfter | RuleKind::DateBefore => {
            let other = required_param(field, def)?;
            if parse_date(other).is_none() {
                return Err(invalid(field, def, "value", "not a recognised date"));
            }
            let label = label_param(field, def)?;
            let (validator, template) = if def.rule == RuleKind::DateAfter {
                (date_after(other.clone(), label), &catalog.date_after)
            } else {
                (date_before(other.clone(), label), &catalog.date_before)
            };
            validator
                .message(message_or(def, template, &[("label", label.to_string())]))
                .into_rule()
        }
        RuleKind::Matches => {
            let other = required_param(field, def)?;
            let label = label_param(field, def)?;
            matches(other.clone(), label)
                .message(message_or(def, &catalog.matches, &[("label", label.to_string())]))
                .into_rule()
        }
    };
    Ok(rule)
}

fn message_or(def: &RuleDefinition, template: &str, params: &[(&str, String)]) -> String {
    def.message
        .clone()
        .unwrap_or_else(|| render(template, params))
}

fn required_param<'a>(field: &str, def: &'a RuleDefinition) -> Result<&'a Value, SchemaError> {
    def.value.as_ref().ok_or_else(|| SchemaError::MissingParameter {
        field: field.to_string(),
        rule: def.rule.as_str().to_string(),
        parameter: "value".to_string(),
    })
}

fn label_param<'a>(field: &str, def: &'a RuleDefinition) -> Result<&'a str, SchemaError> {
    def.label.as_deref().ok_or_else(|| SchemaError::MissingParameter {
        field: field.to_string(),
        rule: def.rule.as_str().to_string(),
        parameter: "label".to_string(),
    })
}

fn length_param(field: &str, def: &RuleDefinition) -> Result<usize, SchemaError> {
    required_param(field, def)?
        .as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| invalid(field, def, "value", "expected a non-negative integer"))
}

fn number_param(field: &str, def: &RuleDefinition) -> Result<f64, SchemaError> {
    required_param(field, def)?
        .as_f64()
        .filter(|n| n.is_finite())
        .ok_or_else(|| invalid(field, def, "value", "expected a number"))
}

fn invalid(field: &str, def: &RuleDefinition, parameter: &str, reason: &str) -> SchemaError {
    SchemaError::InvalidParameter {
        field: field.to_string(),
        rule: def.rule.as_str().to_string(),
        parameter: parameter.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::FormValues;
    use serde_json::json;

    const SIGNUP: &str = r#"
fields:
  name:
    rule: required
  email:
    - rule: required
    - rule: email
      message: "That email looks wrong"
  password:
    - rule: required
    - rule: min_length
      value: 8
  age:
    rule: min
    value: 18
"#;

    #[test]
    fn test_yaml_definition_builds_schema() {
        let definition = SchemaDefinition::from_yaml(SIGNUP).unwrap();
        let schema = definition.build(MessageCatalog::builtin()).unwrap();

        assert_eq!(schema.field_names().collect::<Vec<_>>(), ["name", "email", "password", "age"]);

        let values: FormValues = [
            ("name", json!("")),
            ("email", json!("nope")),
            ("password", json!("short")),
            ("age", json!(17)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let errors = schema.validate(&values);
        assert_eq!(errors.get("name"), Some("This field is required"));
        assert_eq!(errors.get("email"), Some("That email looks wrong"));
        assert_eq!(errors.get("password"), Some("Must be at least 8 characters"));
        assert_eq!(errors.get("age"), Some("Must be at least 18"));
    }

    #[test]
    fn test_catalog_supplies_default_messages() {
        let catalog = MessageCatalog::from_yaml("required: \"Please fill this in\"\n").unwrap();
        let definition = SchemaDefinition::from_json(r#"{"fields": {"name": {"rule": "required"}}}"#).unwrap();
        let schema = definition.build(&catalog).unwrap();

        let errors = schema.validate(&FormValues::new());
        assert_eq!(errors.get("name"), Some("Please fill this in"));
    }

    #[test]
    fn test_cross_field_rules() {
        let definition = SchemaDefinition::from_yaml(
            r#"
fields:
  end_date:
    rule: date_after
    value: "2024-06-01"
    label: start date
  confirm:
    rule: matches
    value: "hunter22"
    label: password
"#,
        )
        .unwrap();
        let schema = definition.build(MessageCatalog::builtin()).unwrap();

        let mut values = FormValues::new();
        values.insert("end_date".to_string(), json!("2024-06-01"));
        values.insert("confirm".to_string(), json!("hunter2"));

        let errors = schema.validate(&values);
        assert_eq!(errors.get("end_date"), Some("Must be after start date"));
        assert_eq!(errors.get("confirm"), Some("Must match password"));
    }

    #[test]
    fn test_missing_parameter_is_reported() {
        let definition = SchemaDefinition::from_yaml("fields:\n  bio:\n    rule: max_length\n").unwrap();

        assert_eq!(
            definition.build(MessageCatalog::builtin()).unwrap_err(),
            SchemaError::MissingParameter {
                field: "bio".to_string(),
                rule: "max_length".to_string(),
                parameter: "value".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_parameters_are_reported() {
        let negative = SchemaDefinition::from_yaml("fields:\n  bio:\n    rule: min_length\n    value: -1\n").unwrap();
        assert!(matches!(
            negative.build(MessageCatalog::builtin()),
            Err(SchemaError::InvalidParameter { .. })
        ));

        let bad_date = SchemaDefinition::from_yaml(
            "fields:\n  end:\n    rule: date_before\n    value: someday\n    label: start\n",
        )
        .unwrap();
        assert!(matches!(
            bad_date.build(MessageCatalog::builtin()),
            Err(SchemaError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_unknown_rule_name_fails_to_parse() {
        let result = SchemaDefinition::from_yaml("fields:\n  name:\n    rule: shouting\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }
}
