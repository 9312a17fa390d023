//! Default rule messages and their loading from configuration files

use crate::error::ConfigError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static BUILTIN: Lazy<MessageCatalog> = Lazy::new(MessageCatalog::default);

/// Messages used by rules that were not given one explicitly.
///
/// Templates may reference `{min}`, `{max}` and `{label}`. Keys missing from a
/// loaded document keep their built-in value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageCatalog {
    pub required: String,
    pub email: String,
    pub phone_number: String,
    pub min_length: String,
    pub max_length: String,
    pub number: String,
    pub min: String,
    pub max: String,
    pub date: String,
    pub date_after: String,
    pub date_before: String,
    pub matches: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            required: "This field is required".to_string(),
            email: "Please enter a valid email address".to_string(),
            phone_number: "Please enter a valid phone number".to_string(),
            min_length: "Must be at least {min} characters".to_string(),
            max_length: "Must be no more than {max} characters".to_string(),
            number: "Must be a valid number".to_string(),
            min: "Must be at least {min}".to_string(),
            max: "Must be no more than {max}".to_string(),
            date: "Please enter a valid date".to_string(),
            date_after: "Must be after {label}".to_string(),
            date_before: "Must be before {label}".to_string(),
            matches: "Must match {label}".to_string(),
        }
    }
}

impl MessageCatalog {
    /// The process-wide built-in catalog
    pub fn builtin() -> &'static MessageCatalog {
        &BUILTIN
    }

    /// Load a catalog from YAML
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Load a catalog from JSON
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }
}

/// Substitute `{name}` placeholders in a message template
pub fn render(template: &str, params: &[(&str, String)]) -> String {
    let mut rendered = template.to_string();
    for (name, value) in params {
        rendered = rendered.replace(&format!("{{{}}}", name), value);
    }
    rendered
}
