//! Required field validator

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use serde_json::Value;

/// Validator that fails on absent or falsy values.
///
/// Falsy means `null`, `false`, zero, or the empty string. Arrays and objects
/// always pass, even when empty.
#[derive(Debug, Clone, Default)]
pub struct RequiredValidator {
    /// Custom error message
    pub message: Option<String>,
}

impl RequiredValidator {
    /// Create a new required validator with default message
    pub fn new() -> Self {
        Self { message: None }
    }

    /// Create a required validator with custom message
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Set a custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn is_falsy(value: Option<&Value>) -> bool {
        match value {
            None | Some(Value::Null) => true,
            Some(Value::Bool(b)) => !b,
            Some(Value::Number(n)) => n.as_f64().map_or(false, |f| f == 0.0 || f.is_nan()),
            Some(Value::String(s)) => s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => false,
        }
    }
}

impl ValidationRule for RequiredValidator {
    fn validate(&self, value: Option<&Value>, field: &str) -> ValidationResult<()> {
        if Self::is_falsy(value) {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| "This field is required".to_string());

            Err(ValidationError::with_code(field, message, "required"))
        } else {
            Ok(())
        }
    }

    fn rule_name(&self) -> &'static str {
        "required"
    }

    fn parameters(&self) -> Option<Value> {
        self.message.as_ref().map(|msg| {
            serde_json::json!({
                "message": msg
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_override() {
        let validator = RequiredValidator::new().message("Name is mandatory");
        let error = validator.validate(Some(&json!("")), "name").unwrap_err();
        assert_eq!(error.message, "Name is mandatory");
    }

    #[test]
    fn test_required_validator_with_absent_value() {
        let validator = RequiredValidator::new();
        let result = validator.validate(None, "name");

        let error = result.unwrap_err();
        assert_eq!(error.field, "name");
        assert_eq!(error.message, "This field is required");
        assert_eq!(error.code, "required");
    }

    #[test]
    fn test_required_validator_with_falsy_values() {
        let validator = RequiredValidator::new();

        for value in [json!(null), json!(""), json!(false), json!(0), json!(0.0)] {
            assert!(
                validator.validate(Some(&value), "field").is_err(),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn test_required_validator_with_truthy_values() {
        let validator = RequiredValidator::new();

        for value in [json!("Bob"), json!(" "), json!(true), json!(12), json!([]), json!({})] {
            assert!(
                validator.validate(Some(&value), "field").is_ok(),
                "{value} should be accepted"
            );
        }
    }

    #[test]
    fn test_required_validator_custom_message() {
        let validator = RequiredValidator::with_message("Name is mandatory");
        let error = validator.validate(None, "name").unwrap_err();
        assert_eq!(error.message, "Name is mandatory");
        assert_eq!(validator.parameters(), Some(json!({"message": "Name is mandatory"})));
    }
}
