//! Input events forwarded by the presentation layer

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of input control that produced a change.
///
/// The controller only distinguishes checkboxes, which store their checked
/// state instead of their text value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Email,
    Password,
    Number,
    Date,
    Tel,
    Textarea,
    Select,
    Checkbox,
}

impl InputKind {
    pub fn is_checkbox(&self) -> bool {
        matches!(self, InputKind::Checkbox)
    }
}

impl From<&str> for InputKind {
    /// Map an HTML input `type`; unknown types behave like text
    fn from(kind: &str) -> Self {
        match kind.to_ascii_lowercase().as_str() {
            "email" => InputKind::Email,
            "password" => InputKind::Password,
            "number" | "range" => InputKind::Number,
            "date" | "datetime-local" => InputKind::Date,
            "tel" => InputKind::Tel,
            "textarea" => InputKind::Textarea,
            "select" | "select-one" | "select-multiple" => InputKind::Select,
            "checkbox" => InputKind::Checkbox,
            _ => InputKind::Text,
        }
    }
}

/// A field change as reported by an input control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub name: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub kind: InputKind,
    #[serde(default)]
    pub checked: bool,
}

impl ChangeEvent {
    pub fn new(name: impl Into<String>, value: impl Into<Value>, kind: InputKind) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind,
            checked: false,
        }
    }

    /// A text-like input change
    pub fn text(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(name, value, InputKind::Text)
    }

    /// A checkbox toggle; the raw value is the control's `value` attribute
    pub fn checkbox(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            value: Value::String("on".to_string()),
            kind: InputKind::Checkbox,
            checked,
        }
    }

    /// The value to store: the checked flag for checkboxes, the raw value otherwise
    pub fn resolved_value(&self) -> Value {
        if self.kind.is_checkbox() {
            Value::Bool(self.checked)
        } else {
            self.value.clone()
        }
    }
}
