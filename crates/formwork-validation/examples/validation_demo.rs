//! Walks through the built-in rules, composition and a declarative schema

use formwork_validation::validators::*;
use formwork_validation::{
    compose, create_validator, FormSchema, FormValidator, FormValues, MessageCatalog,
    SchemaDefinition, ValidationRule,
};
use serde_json::{json, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("formwork-validation demo");
    println!("========================\n");

    demo_individual_rules();
    demo_composition();
    demo_declarative_schema()?;

    println!("\nAll validation demos completed.");
    Ok(())
}

fn show(label: &str, rule: &dyn ValidationRule, value: Value) {
    match rule.error_message(&value).as_str() {
        "" => println!("  {:<14} {:<24} ok", label, value.to_string()),
        message => println!("  {:<14} {:<24} {}", label, value.to_string(), message),
    }
}

fn demo_individual_rules() {
    println!("Individual rules:");
    show("required", &required(), json!(""));
    show("required", &required(), json!(0));
    show("email", &email(), json!("user@example.com"));
    show("email", &email(), json!("invalid-email"));
    show("phone_number", &phone_number(), json!("(555) 123-4567"));
    show("min_length(8)", &min_length(8), json!("short"));
    show("number", &number(), json!("12.5kg"));
    show("max(100)", &max(100.0), json!("150"));
    show("date", &date(), json!("2024-02-30"));
    show("date_after", &date_after("2024-01-01", "start date"), json!("2023-12-31"));
    show("matches", &matches("hunter22", "password"), json!("hunter2"));
}

fn demo_composition() {
    println!("\nComposition:");
    let rule = compose![required(), email()];
    show("required+email", &rule, json!(""));
    show("required+email", &rule, json!("not-an-email"));
    show("required+email", &rule, json!("a@b.co"));

    let validator = create_validator(
        FormSchema::new()
            .field("name", required())
            .field("email", compose![required(), email()]),
    );
    let mut values = FormValues::new();
    values.insert("name".to_string(), json!(""));
    values.insert("email".to_string(), json!("x"));
    println!("  whole form -> {}", validator.validate_form(&values));
}

fn demo_declarative_schema() -> Result<(), Box<dyn std::error::Error>> {
    println!("\nDeclarative schema:");
    let definition = SchemaDefinition::from_yaml(
        r#"
fields:
  title:
    - rule: required
    - rule: max_length
      value: 40
  scheduled_for:
    rule: date_after
    value: "2024-01-01"
    label: the opening date
"#,
    )?;
    let schema = definition.build(MessageCatalog::builtin())?;

    let mut values = FormValues::new();
    values.insert("title".to_string(), json!("Replace the lobby light fixtures"));
    values.insert("scheduled_for".to_string(), json!("2023-11-05"));

    println!("  {}", schema.validate(&values));
    Ok(())
}
