//! # formwork-form
//!
//! Form state controller: owns the values, errors, touched markers and
//! submission status of one form, and changes them only in response to
//! change, blur, submit, set-field and reset events.
//!
//! Every transition is a [`FormAction`] applied by [`FormReducer::reduce`], so
//! the state machine can be exercised without any UI.

pub mod action;
pub mod controller;
pub mod event;
pub mod state;
pub mod submit;

pub use action::{FormAction, FormReducer};
pub use controller::FormController;
pub use event::{ChangeEvent, InputKind};
pub use state::{FormState, SubmitStatus, TouchedSet};
pub use submit::{
    submit_fn, FnSubmitHandler, SubmitErrorObserver, SubmitFailure, SubmitHandler, SubmitOutcome,
};

pub use formwork_validation::{FormErrors, FormValidator, FormValues};
