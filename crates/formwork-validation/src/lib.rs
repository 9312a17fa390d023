//! # formwork-validation
//!
//! Field rules that map a value to an error message, combinators that chain
//! them, and schemas that turn a set of field rules into a whole-form
//! validator.
//!
//! ```
//! use formwork_validation::{compose, create_validator, FormSchema, FormValidator, FormValues};
//! use formwork_validation::validators::{email, required};
//! use serde_json::json;
//!
//! let validator = create_validator(
//!     FormSchema::new()
//!         .field("name", required())
//!         .field("email", compose![required(), email()]),
//! );
//!
//! let mut values = FormValues::new();
//! values.insert("name".to_string(), json!(""));
//! values.insert("email".to_string(), json!("x"));
//!
//! let errors = validator.validate_form(&values);
//! assert_eq!(errors.get("name"), Some("This field is required"));
//! assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
//! ```

pub mod config;
pub mod definition;
pub mod error;
pub mod schema;
pub mod traits;
pub mod validators;

// Re-exports for easy access
pub use config::MessageCatalog;
pub use definition::{FieldDefinition, RuleDefinition, RuleKind, SchemaDefinition};
pub use error::{ConfigError, FormErrors, SchemaError, ValidationError, ValidationResult};
pub use schema::{create_validator, FieldSchema, FormSchema, SchemaValidator};
pub use traits::{is_empty_value, FormValidator, FormValues, IntoRule, Rule, ValidationRule};

// Built-in validators
pub use validators::{
    ComparisonBound, Compose, CustomValidator, DateComparisonValidator, DateValidator,
    EmailValidator, LengthValidator, MatchesValidator, NumericValidator, PhoneNumberValidator,
    RequiredValidator,
};
