//! State transitions of a form, expressed as actions and a reducer

use crate::event::ChangeEvent;
use crate::state::{FormState, SubmitStatus};
use formwork_validation::{FormErrors, FormValidator, FormValues};
use serde_json::Value;
use std::sync::Arc;

/// Everything that can happen to a form
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    /// A user edit; clears the field's error without re-validating
    Change { name: String, value: Value },
    /// Focus left a field; touches it and validates it alone
    Blur { name: String },
    /// A programmatic update, same effect as `Change`
    SetField { name: String, value: Value },
    /// Submission started: touch every field and validate the whole form
    Submit,
    /// Submission finished, whatever the outcome
    SubmitSettled,
    /// Back to the given values, or the initial ones
    Reset { values: Option<FormValues> },
    /// Replace all errors with a full validation
    Validate,
}

impl From<ChangeEvent> for FormAction {
    fn from(event: ChangeEvent) -> Self {
        let value = event.resolved_value();
        FormAction::Change {
            name: event.name,
            value,
        }
    }
}

/// Pure transition function over [`FormState`].
///
/// Holds the whole-form validator and the values the form was created with,
/// which `Reset` falls back to.
#[derive(Clone)]
pub struct FormReducer {
    validator: Arc<dyn FormValidator>,
    initial_values: FormValues,
}

impl FormReducer {
    pub fn new(initial_values: FormValues, validator: impl FormValidator + 'static) -> Self {
        Self::with_shared(initial_values, Arc::new(validator))
    }

    pub fn with_shared(initial_values: FormValues, validator: Arc<dyn FormValidator>) -> Self {
        Self {
            validator,
            initial_values,
        }
    }

    pub fn initial_values(&self) -> &FormValues {
        &self.initial_values
    }

    pub fn initial_state(&self) -> FormState {
        FormState::new(self.initial_values.clone())
    }

    /// Validate only `name`, as seen through a values map holding just that
    /// field; messages for any other field are discarded
    fn validate_single(&self, values: &FormValues, name: &str) -> FormErrors {
        let value = values.get(name).cloned().unwrap_or(Value::Null);
        let mut slice = FormValues::new();
        slice.insert(name.to_string(), value);

        self.validator
            .validate_form(&slice)
            .get(name)
            .map(|message| FormErrors::from_iter([(name, message)]))
            .unwrap_or_default()
    }

    fn validate_all(&self, values: &FormValues) -> FormErrors {
        self.validator.validate_form(values)
    }

    pub fn reduce(&self, mut state: FormState, action: FormAction) -> FormState {
        match action {
            FormAction::Change { name, value } | FormAction::SetField { name, value } => {
                state.errors.clear_field(&name);
                state.values.insert(name, value);
            }
            FormAction::Blur { name } => {
                state.touched.touch(name.as_str());
                let blurred = self.validate_single(&state.values, &name);
                state.errors.merge(blurred);
            }
            FormAction::Submit => {
                state.status = SubmitStatus::Submitting;
                let fields: Vec<String> = state.values.keys().cloned().collect();
                for field in fields {
                    state.touched.touch(field);
                }
                state.errors = self.validate_all(&state.values);
            }
            FormAction::SubmitSettled => {
                state.status = SubmitStatus::Idle;
            }
            FormAction::Reset { values } => {
                state = FormState::new(values.unwrap_or_else(|| self.initial_values.clone()));
            }
            FormAction::Validate => {
                state.errors = self.validate_all(&state.values);
            }
        }
        state
    }
}

impl std::fmt::Debug for FormReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormReducer")
            .field("initial_values", &self.initial_values)
            .finish_non_exhaustive()
    }
}
