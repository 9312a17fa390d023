//! The form state owned by a controller

use formwork_validation::{FormErrors, FormValues};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Submission phase of a form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
}

/// Fields the user has interacted with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TouchedSet {
    fields: IndexMap<String, bool>,
}

impl TouchedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch(&mut self, field: impl Into<String>) {
        self.fields.insert(field.into(), true);
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.fields.get(field).copied().unwrap_or(false)
    }

    /// Touched field names, in the order they were first touched
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, touched)| **touched)
            .map(|(field, _)| field.as_str())
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Values, errors, touched markers and submission status of one form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub values: FormValues,
    pub errors: FormErrors,
    pub touched: TouchedSet,
    pub status: SubmitStatus,
}

impl FormState {
    /// Fresh state: the given values, no errors, nothing touched, idle
    pub fn new(values: FormValues) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    /// True when no field currently carries an error message
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// The error to display for a field: only once the field was touched
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        if self.touched.is_touched(field) {
            self.errors.get(field)
        } else {
            None
        }
    }
}
