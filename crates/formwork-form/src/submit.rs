//! Submission callbacks and how their failures are reported

use async_trait::async_trait;
use formwork_validation::FormValues;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

/// Receives the form values once they pass validation
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    async fn submit(&self, values: FormValues) -> anyhow::Result<()>;
}

/// Adapter turning an async closure into a [`SubmitHandler`]
pub struct FnSubmitHandler<F> {
    f: F,
}

/// Wrap `f` as a submit handler
pub fn submit_fn<F, Fut>(f: F) -> FnSubmitHandler<F>
where
    F: Fn(FormValues) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    FnSubmitHandler { f }
}

#[async_trait]
impl<F, Fut> SubmitHandler for FnSubmitHandler<F>
where
    F: Fn(FormValues) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn submit(&self, values: FormValues) -> anyhow::Result<()> {
        (self.f)(values).await
    }
}

/// Why a submit handler did not complete.
///
/// These never reach the caller of `handle_submit`; they are logged and
/// handed to the controller's error observer.
#[derive(Debug, Error)]
pub enum SubmitFailure {
    #[error("submit handler returned an error: {0:#}")]
    Handler(#[source] anyhow::Error),

    #[error("submit handler panicked: {0}")]
    Panicked(String),
}

/// Hook notified of swallowed submission failures
pub type SubmitErrorObserver = Arc<dyn Fn(&SubmitFailure) + Send + Sync>;

/// What a submission attempt came to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the handler was not called
    Invalid,
    /// The handler completed successfully
    Submitted,
    /// The handler failed or panicked; see the error observer
    Failed,
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted)
    }
}

/// Best-effort text of a panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
