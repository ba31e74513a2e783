//! Custom validation functions and closures

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use serde_json::Value;
use std::sync::Arc;

/// Signature of a user-supplied check: `Ok(())` passes, `Err(message)` fails.
pub type CheckFn = Arc<dyn Fn(Option<&Value>) -> Result<(), String> + Send + Sync>;

/// Custom validator that wraps a user-defined check.
///
/// Unlike the built-in rules, the check also sees absent and `null` values
/// and decides for itself whether they are acceptable.
#[derive(Clone)]
pub struct CustomValidator {
    /// Name/identifier for this custom validator
    pub name: String,
    check: CheckFn,
    /// Custom error message, replaces whatever the check returned
    pub message: Option<String>,
}

impl CustomValidator {
    /// Create a new custom validator
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(Option<&Value>) -> Result<(), String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
            message: None,
        }
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Get the validator name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Passes when the value is a string contained in `allowed_values`.
    /// Absent values pass.
    pub fn one_of(name: impl Into<String>, allowed_values: Vec<String>) -> Self {
        Self::new(name, move |value| match value {
            None | Some(Value::Null) => Ok(()),
            Some(Value::String(s)) if allowed_values.contains(s) => Ok(()),
            Some(_) => Err(format!("must be one of: {}", allowed_values.join(", "))),
        })
    }
}

impl std::fmt::Debug for CustomValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomValidator")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish()
    }
}

impl ValidationRule for CustomValidator {
    fn validate(&self, value: Option<&Value>, field: &str) -> ValidationResult<()> {
        (self.check)(value).map_err(|message| {
            let message = self.message.clone().unwrap_or(message);
            ValidationError::with_code(field, message, "custom")
        })
    }

    fn rule_name(&self) -> &'static str {
        "custom"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        params.insert("name".to_string(), Value::String(self.name.clone()));

        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }

        Some(Value::Object(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn positive() -> CustomValidator {
        CustomValidator::new("positive", |value| match value.and_then(Value::as_f64) {
            Some(n) if n > 0.0 => Ok(()),
            _ => Err("must be positive".to_string()),
        })
    }

    #[test]
    fn test_custom_validator_pass_and_fail() {
        let validator = positive();

        assert!(validator.validate(Some(&json!(5)), "amount").is_ok());

        let error = validator.validate(Some(&json!(-5)), "amount").unwrap_err();
        assert_eq!(error.field, "amount");
        assert_eq!(error.message, "must be positive");
        assert_eq!(error.code, "custom");
    }

    #[test]
    fn test_custom_validator_sees_absent_values() {
        let validator = positive();
        assert!(validator.validate(None, "amount").is_err());
    }

    #[test]
    fn test_custom_message_override() {
        let validator = positive().message("Amount has to be above zero");
        let error = validator.validate(Some(&json!(0)), "amount").unwrap_err();
        assert_eq!(error.message, "Amount has to be above zero");
    }

    #[test]
    fn test_one_of() {
        let validator =
            CustomValidator::one_of("status", vec!["draft".to_string(), "published".to_string()]);

        assert!(validator.validate(Some(&json!("draft")), "status").is_ok());
        assert!(validator.validate(None, "status").is_ok());

        let error = validator.validate(Some(&json!("archived")), "status").unwrap_err();
        assert_eq!(error.message, "must be one of: draft, published");
    }

    #[test]
    fn test_debug_hides_closure() {
        let debug = format!("{:?}", positive());
        assert!(debug.contains("positive"));
    }
}
