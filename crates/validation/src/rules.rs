//! Field rule collection and the record validation pipeline

use crate::error::ValidationErrors;
use crate::traits::ValidationRule;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Shared handle to a rule; rules are immutable once registered
pub type SharedRule = Arc<dyn ValidationRule>;

/// Ordered mapping of field name to its rules.
///
/// Fields keep the order in which they were first given a rule, and rules keep
/// their registration order within a field. Both orders decide the order of
/// the messages returned by [`FieldRules::validate`].
#[derive(Clone, Default)]
pub struct FieldRules {
    fields: Vec<(String, Vec<SharedRule>)>,
}

impl std::fmt::Debug for FieldRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let summary: Vec<(&str, Vec<&'static str>)> = self
            .fields
            .iter()
            .map(|(field, rules)| (field.as_str(), rules.iter().map(|r| r.rule_name()).collect()))
            .collect();
        f.debug_struct("FieldRules").field("fields", &summary).finish()
    }
}

impl FieldRules {
    /// Create a new empty rules collection
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a rule to `field`
    pub fn add<R>(&mut self, field: impl Into<String>, rule: R)
    where
        R: ValidationRule + 'static,
    {
        self.add_shared(field, Arc::new(rule));
    }

    /// Append an already shared rule to `field`
    pub fn add_shared(&mut self, field: impl Into<String>, rule: SharedRule) {
        self.extend(field, std::iter::once(rule));
    }

    /// Append several rules to `field`, keeping their order
    pub fn extend<I>(&mut self, field: impl Into<String>, rules: I)
    where
        I: IntoIterator<Item = SharedRule>,
    {
        let field = field.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => existing.extend(rules),
            None => self.fields.push((field, rules.into_iter().collect())),
        }
    }

    /// Get rules for a specific field
    pub fn get(&self, field: &str) -> Option<&[SharedRule]> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rules)| rules.as_slice())
    }

    /// Iterate `(field, rules)` in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SharedRule])> {
        self.fields
            .iter()
            .map(|(name, rules)| (name.as_str(), rules.as_slice()))
    }

    /// Names of all fields that carry rules, in declaration order
    pub fn fields(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Check if there are any rules defined
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields with rules
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Run every rule of every field against `record`.
    ///
    /// All rules run, even after a failure, and every failure is collected.
    /// Fields without rules are unconstrained. An empty result means the
    /// record is valid.
    pub fn validate(&self, record: &Map<String, Value>) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        for (field, rules) in &self.fields {
            let value = record.get(field);
            for rule in rules {
                if let Err(error) = rule.validate(value, field) {
                    errors.add(error);
                }
            }
        }

        errors
    }

    /// Like [`FieldRules::validate`], but only for fields present in `record`.
    ///
    /// Used for partial updates, where an omitted field keeps its stored value.
    pub fn validate_present(&self, record: &Map<String, Value>) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        for (field, rules) in &self.fields {
            let Some(value) = record.get(field) else {
                continue;
            };
            for rule in rules {
                if let Err(error) = rule.validate(Some(value), field) {
                    errors.add(error);
                }
            }
        }

        errors
    }
}
