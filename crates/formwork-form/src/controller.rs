//! The form state controller

use crate::action::{FormAction, FormReducer};
use crate::event::ChangeEvent;
use crate::state::FormState;
use crate::submit::{panic_message, SubmitErrorObserver, SubmitFailure, SubmitHandler, SubmitOutcome};
use formwork_validation::{FormErrors, FormValidator, FormValues};
use futures::FutureExt;
use serde_json::Value;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Owns the state of one form and is its only write path.
///
/// Handlers take `&mut self`, so events are applied one at a time and each
/// sees the writes of the previous one.
pub struct FormController {
    reducer: FormReducer,
    state: FormState,
    error_observer: Option<SubmitErrorObserver>,
}

impl FormController {
    /// Start a form with `initial_values`, no errors, nothing touched
    pub fn new(initial_values: FormValues, validator: impl FormValidator + 'static) -> Self {
        Self::from_reducer(FormReducer::new(initial_values, validator))
    }

    pub fn from_reducer(reducer: FormReducer) -> Self {
        let state = reducer.initial_state();
        Self {
            reducer,
            state,
            error_observer: None,
        }
    }

    /// Be told about submission failures the controller swallows
    pub fn with_error_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(&SubmitFailure) + Send + Sync + 'static,
    {
        self.error_observer = Some(Arc::new(observer));
        self
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn values(&self) -> &FormValues {
        &self.state.values
    }

    pub fn errors(&self) -> &FormErrors {
        &self.state.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    /// True when the values differ from the ones the form started with
    pub fn is_dirty(&self) -> bool {
        &self.state.values != self.reducer.initial_values()
    }

    /// Apply an action to the state
    pub fn dispatch(&mut self, action: FormAction) {
        tracing::trace!(?action, "dispatching form action");
        let state = std::mem::take(&mut self.state);
        self.state = self.reducer.reduce(state, action);
    }

    pub fn handle_change(&mut self, event: ChangeEvent) {
        self.dispatch(FormAction::from(event));
    }

    pub fn handle_blur(&mut self, name: &str) {
        self.dispatch(FormAction::Blur {
            name: name.to_string(),
        });
        if let Some(message) = self.state.errors.get(name) {
            tracing::debug!(field = name, error = message, "field invalid on blur");
        }
    }

    pub fn set_field_value(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.dispatch(FormAction::SetField {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Validate every field, replacing all errors; true when the form is valid
    pub fn validate_form(&mut self) -> bool {
        self.dispatch(FormAction::Validate);
        self.state.is_valid()
    }

    /// Run one submission attempt.
    ///
    /// Marks every field touched and validates; only a valid form reaches
    /// `handler`. A handler error or panic is logged, passed to the error
    /// observer and swallowed. The form is idle again when this returns,
    /// and also when the returned future is dropped before completing.
    pub async fn handle_submit<H>(&mut self, handler: &H) -> SubmitOutcome
    where
        H: SubmitHandler + ?Sized,
    {
        self.dispatch(FormAction::Submit);

        let FormController {
            reducer,
            state,
            error_observer,
        } = self;
        let settle = SettleOnDrop { reducer, state };

        if !settle.state.is_valid() {
            tracing::debug!(
                invalid_fields = settle.state.errors.len(),
                "form submission blocked by validation"
            );
            return SubmitOutcome::Invalid;
        }

        let values = settle.state.values.clone();
        tracing::debug!(fields = values.len(), "submitting form");

        let result = match panic::catch_unwind(AssertUnwindSafe(|| handler.submit(values))) {
            Ok(submission) => AssertUnwindSafe(submission).catch_unwind().await,
            Err(payload) => Err(payload),
        };

        match result {
            Ok(Ok(())) => SubmitOutcome::Submitted,
            Ok(Err(error)) => {
                report(error_observer, SubmitFailure::Handler(error));
                SubmitOutcome::Failed
            }
            Err(payload) => {
                report(error_observer, SubmitFailure::Panicked(panic_message(payload.as_ref())));
                SubmitOutcome::Failed
            }
        }
    }

    /// Back to `values`, or the initial values, with errors and touched cleared
    pub fn reset_form(&mut self, values: Option<FormValues>) {
        self.dispatch(FormAction::Reset { values });
    }
}

fn report(observer: &Option<SubmitErrorObserver>, failure: SubmitFailure) {
    tracing::error!(error = %failure, "form submission failed");
    if let Some(observer) = observer {
        observer(&failure);
    }
}

/// Applies `SubmitSettled` when dropped, so a submission that is cancelled
/// mid-await still leaves the form idle
struct SettleOnDrop<'a> {
    reducer: &'a FormReducer,
    state: &'a mut FormState,
}

impl Drop for SettleOnDrop<'_> {
    fn drop(&mut self) {
        let state = std::mem::take(self.state);
        *self.state = self.reducer.reduce(state, FormAction::SubmitSettled);
    }
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("state", &self.state)
            .field("has_error_observer", &self.error_observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submit::submit_fn;
    use formwork_validation::validators::{email, min_length, required};
    use formwork_validation::{compose, create_validator, FormSchema};
    use serde_json::json;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use tracing_test::traced_test;

    fn signup() -> FormController {
        let mut initial = FormValues::new();
        initial.insert("name".to_string(), json!(""));
        initial.insert("email".to_string(), json!(""));
        initial.insert("agree".to_string(), json!(false));

        FormController::new(
            initial,
            create_validator(
                FormSchema::new()
                    .field("name", compose![required(), min_length(2)])
                    .field("email", compose![required(), email()]),
            ),
        )
    }

    #[test]
    fn test_initial_state() {
        let form = signup();

        assert_eq!(form.values().len(), 3);
        assert!(form.errors().is_empty());
        assert!(form.state().touched.is_empty());
        assert!(!form.is_submitting());
        assert!(!form.is_dirty());
    }

    #[test]
    fn test_change_clears_only_that_fields_error() {
        let mut form = signup();
        assert!(!form.validate_form());

        form.handle_change(ChangeEvent::text("email", "ada@"));

        assert_eq!(form.errors().raw("email"), Some(""));
        assert_eq!(form.errors().get("name"), Some("This field is required"));
        assert_eq!(form.values()["email"], json!("ada@"));
        assert!(form.is_dirty());
    }

    #[test]
    fn test_checkbox_change_stores_boolean() {
        let mut form = signup();
        form.handle_change(ChangeEvent::checkbox("agree", true));
        assert_eq!(form.values()["agree"], json!(true));
    }

    #[test]
    fn test_set_field_value_adds_new_keys() {
        let mut form = signup();
        form.set_field_value("referral", "newsletter");
        assert_eq!(form.values()["referral"], json!("newsletter"));
    }

    #[test]
    fn test_blur_touches_and_validates_one_field() {
        let mut form = signup();
        form.set_field_value("email", "not-an-email");
        form.handle_blur("email");

        assert!(form.state().touched.is_touched("email"));
        assert!(!form.state().touched.is_touched("name"));
        assert_eq!(form.errors().get("email"), Some("Please enter a valid email address"));
        assert_eq!(form.errors().get("name"), None);
    }

    #[test]
    fn test_validate_form_twice_is_stable() {
        let mut form = signup();
        form.set_field_value("name", "A");

        assert!(!form.validate_form());
        let first = form.errors().clone();
        assert!(!form.validate_form());
        assert_eq!(&first, form.errors());
    }

    #[tokio::test]
    async fn test_invalid_submit_never_calls_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handler = submit_fn(move |_values| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        let mut form = signup();
        let outcome = form.handle_submit(&handler).await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!form.is_submitting());
        for field in ["name", "email", "agree"] {
            assert!(form.state().touched.is_touched(field), "{} not touched", field);
        }
    }

    #[tokio::test]
    async fn test_valid_submit_passes_values() {
        let received = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&received);
        let handler = submit_fn(move |values: FormValues| {
            let sink = Arc::clone(&sink);
            async move {
                *sink.lock().unwrap() = Some(values);
                Ok(())
            }
        });

        let mut form = signup();
        form.set_field_value("name", "Ada");
        form.set_field_value("email", "ada@example.com");

        assert_eq!(form.handle_submit(&handler).await, SubmitOutcome::Submitted);
        assert!(!form.is_submitting());

        let values = received.lock().unwrap().take().unwrap();
        assert_eq!(values["email"], json!("ada@example.com"));
    }

    #[traced_test]
    #[tokio::test]
    async fn test_failing_handler_is_swallowed_and_observed() {
        let observed = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&observed);

        let mut form = signup().with_error_observer(move |failure| {
            log.lock().unwrap().push(failure.to_string());
        });
        form.set_field_value("name", "Ada");
        form.set_field_value("email", "ada@example.com");

        let handler = submit_fn(|_values| async { Err(anyhow::anyhow!("service unavailable")) });
        let outcome = form.handle_submit(&handler).await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert!(!form.is_submitting());
        assert_eq!(
            observed.lock().unwrap().as_slice(),
            ["submit handler returned an error: service unavailable"]
        );
        assert!(logs_contain("form submission failed"));
    }

    #[tokio::test]
    async fn test_panicking_handler_still_settles() {
        let mut form = signup();
        form.set_field_value("name", "Ada");
        form.set_field_value("email", "ada@example.com");

        let handler = submit_fn(|_values| async {
            if true {
                panic!("handler exploded");
            }
            Ok(())
        });

        assert_eq!(form.handle_submit(&handler).await, SubmitOutcome::Failed);
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_cancelled_submit_returns_to_idle() {
        let mut form = signup();
        form.set_field_value("name", "Ada");
        form.set_field_value("email", "ada@example.com");

        let handler = submit_fn(|_values| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(())
        });

        let result = tokio::time::timeout(Duration::from_millis(20), form.handle_submit(&handler)).await;

        assert!(result.is_err());
        assert!(!form.is_submitting());
        assert!(form.state().touched.is_touched("email"));
    }

    /// Panics while producing its future instead of inside it
    struct PanicsBeforeFuture;

    impl SubmitHandler for PanicsBeforeFuture {
        fn submit<'life0, 'async_trait>(
            &'life0 self,
            _values: FormValues,
        ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'async_trait>>
        where
            'life0: 'async_trait,
            Self: 'async_trait,
        {
            panic!("handler refused to start");
        }
    }

    #[tokio::test]
    async fn test_handler_panicking_before_its_future_is_contained() {
        let observed = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&observed);

        let mut form = signup().with_error_observer(move |failure| {
            log.lock().unwrap().push(failure.to_string());
        });
        form.set_field_value("name", "Ada");
        form.set_field_value("email", "ada@example.com");

        assert_eq!(form.handle_submit(&PanicsBeforeFuture).await, SubmitOutcome::Failed);
        assert!(!form.is_submitting());
        assert_eq!(
            observed.lock().unwrap().as_slice(),
            ["submit handler panicked: handler refused to start"]
        );
    }

    #[test]
    fn test_reset_without_values_restores_initial() {
        let mut form = signup();
        form.set_field_value("name", "Ada");
        form.handle_blur("email");

        form.reset_form(None);

        assert_eq!(form.values()["name"], json!(""));
        assert!(form.errors().is_empty());
        assert!(form.state().touched.is_empty());
        assert!(!form.is_dirty());
    }
}
