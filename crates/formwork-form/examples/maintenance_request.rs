//! Drives a maintenance-request form through a typical session:
//! typing, blurring, a rejected submit, a failing backend and a reset.

use formwork_form::{submit_fn, ChangeEvent, FormController, InputKind, SubmitOutcome};
use formwork_validation::validators::*;
use formwork_validation::{compose, create_validator, FormSchema, FormValues};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn initial_values() -> FormValues {
    [
        ("title", json!("")),
        ("contact_email", json!("")),
        ("contact_phone", json!("")),
        ("priority", json!("")),
        ("scheduled_for", json!("")),
        ("urgent", json!(false)),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value))
    .collect()
}

fn schema() -> FormSchema {
    FormSchema::new()
        .field("title", compose![required(), min_length(5), max_length(80)])
        .field("contact_email", compose![required(), email()])
        .field("contact_phone", phone_number())
        .field("priority", compose![number(), min(1.0), max(5.0)])
        .field("scheduled_for", compose![date(), date_after("2024-01-01", "the opening date")])
}

fn print_state(step: &str, form: &FormController) {
    println!("\n== {}", step);
    for (field, value) in form.values() {
        match form.state().visible_error(field) {
            Some(message) => println!("  {:<14} {:<28} {}", field, value.to_string(), message),
            None => println!("  {:<14} {}", field, value),
        }
    }
    println!("  submitting: {}  dirty: {}", form.is_submitting(), form.is_dirty());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("formwork_form=debug")),
        )
        .init();

    let attempts = Arc::new(AtomicUsize::new(0));
    let backend_attempts = Arc::clone(&attempts);
    let backend = submit_fn(move |values: FormValues| {
        let attempt = backend_attempts.fetch_add(1, Ordering::SeqCst) + 1;
        async move {
            if attempt == 1 {
                anyhow::bail!("work order service unavailable");
            }
            tracing::info!(title = %values["title"], "work order created");
            Ok(())
        }
    });

    let mut form = FormController::new(initial_values(), create_validator(schema()))
        .with_error_observer(|failure| eprintln!("  observer: {}", failure));

    form.handle_change(ChangeEvent::text("title", "Leak"));
    form.handle_blur("title");
    form.handle_change(ChangeEvent::new("contact_email", "tenant@", InputKind::Email));
    form.handle_blur("contact_email");
    print_state("after blurring two fields", &form);

    let outcome = form.handle_submit(&backend).await;
    print_state(&format!("first submit: {:?}", outcome), &form);

    form.handle_change(ChangeEvent::text("title", "Kitchen tap leaking"));
    form.handle_change(ChangeEvent::new("contact_email", "tenant@example.com", InputKind::Email));
    form.handle_change(ChangeEvent::new("contact_phone", "+44 20 7946 0958", InputKind::Tel));
    form.handle_change(ChangeEvent::new("priority", "2", InputKind::Number));
    form.handle_change(ChangeEvent::new("scheduled_for", "2024-03-14", InputKind::Date));
    form.handle_change(ChangeEvent::checkbox("urgent", true));

    let outcome = form.handle_submit(&backend).await;
    print_state(&format!("backend down: {:?}", outcome), &form);

    let outcome = form.handle_submit(&backend).await;
    print_state(&format!("retry: {:?}", outcome), &form);
    assert_eq!(outcome, SubmitOutcome::Submitted);

    form.reset_form(None);
    print_state("after reset", &form);

    Ok(())
}
