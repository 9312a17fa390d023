//! Comparison values for cross-field rules

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// The value a cross-field rule compares against.
///
/// `Fixed` is a snapshot taken when the rule is built: if the other field
/// changes afterwards the rule keeps the old value until the schema is
/// rebuilt. `Live` re-reads the value through an accessor on every check.
#[derive(Clone)]
pub enum ComparisonBound {
    Fixed(Value),
    Live(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl ComparisonBound {
    /// Snapshot a value
    pub fn fixed(value: impl Into<Value>) -> Self {
        ComparisonBound::Fixed(value.into())
    }

    /// Read the value through `accessor` at validation time
    pub fn live<F>(accessor: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        ComparisonBound::Live(Arc::new(accessor))
    }

    /// The value to compare against right now
    pub fn current(&self) -> Value {
        match self {
            ComparisonBound::Fixed(value) => value.clone(),
            ComparisonBound::Live(accessor) => accessor(),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, ComparisonBound::Live(_))
    }
}

impl fmt::Debug for ComparisonBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonBound::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            ComparisonBound::Live(_) => f.write_str("Live(..)"),
        }
    }
}

impl From<Value> for ComparisonBound {
    fn from(value: Value) -> Self {
        ComparisonBound::Fixed(value)
    }
}
