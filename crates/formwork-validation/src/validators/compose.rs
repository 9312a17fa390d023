//! Sequential composition of rules

use crate::error::ValidationResult;
use crate::traits::{IntoRule, Rule, ValidationRule};
use serde_json::Value;

/// Runs rules in order against the same value and reports the first failure.
///
/// Later rules are not evaluated once one fails, so declaration order decides
/// which message wins. An empty composition accepts everything.
#[derive(Clone, Default)]
pub struct Compose {
    rules: Vec<Rule>,
}

impl Compose {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule to the sequence
    pub fn rule(mut self, rule: impl IntoRule) -> Self {
        self.rules.push(rule.into_rule());
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for Compose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| rule.rule_name()))
            .finish()
    }
}

impl FromIterator<Rule> for Compose {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

/// Evaluate `rules` in order, stopping at the first failure
pub fn first_failure(rules: &[Rule], value: &Value) -> ValidationResult<()> {
    rules.iter().try_for_each(|rule| rule.validate(value))
}

impl ValidationRule for Compose {
    fn validate(&self, value: &Value) -> ValidationResult<()> {
        first_failure(&self.rules, value)
    }

    fn rule_name(&self) -> &'static str {
        "compose"
    }

    fn parameters(&self) -> Option<Value> {
        let names: Vec<Value> = self
            .rules
            .iter()
            .map(|rule| Value::String(rule.rule_name().to_string()))
            .collect();
        Some(serde_json::json!({ "rules": names }))
    }
}
