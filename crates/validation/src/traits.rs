//! Core validation traits

use crate::error::{ValidationError, ValidationResult};
use serde_json::Value;

/// A single field rule.
///
/// Rules are pure: they look at the candidate value only and report either a
/// pass or one failure message. `value` is `None` when the field is absent
/// from the record being validated.
pub trait ValidationRule: Send + Sync {
    /// Validate a single value
    fn validate(&self, value: Option<&Value>, field: &str) -> ValidationResult<()>;

    /// Get the validation rule name/type
    fn rule_name(&self) -> &'static str;

    /// Get validation rule parameters/configuration as JSON
    fn parameters(&self) -> Option<Value> {
        None
    }
}

/// Helper trait for creating validation errors
pub trait CreateValidationError {
    fn validation_error(field: &str, message: &str) -> ValidationError {
        ValidationError::new(field, message)
    }

    fn validation_error_with_code(field: &str, message: &str, code: &str) -> ValidationError {
        ValidationError::with_code(field, message, code)
    }
}

impl<T> CreateValidationError for T {}

/// Absent and `null` values are skipped by every rule except `required`.
pub(crate) fn is_blank(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EvenValidator;

    impl ValidationRule for EvenValidator {
        fn validate(&self, value: Option<&Value>, field: &str) -> ValidationResult<()> {
            match value.and_then(Value::as_i64) {
                Some(n) if n % 2 == 0 => Ok(()),
                _ => Err(Self::validation_error(field, "must be even")),
            }
        }

        fn rule_name(&self) -> &'static str {
            "even"
        }
    }

    #[test]
    fn test_custom_rule_implementation() {
        let rule = EvenValidator;
        assert!(rule.validate(Some(&json!(4)), "count").is_ok());

        let err = rule.validate(Some(&json!(3)), "count").unwrap_err();
        assert_eq!(err.field, "count");
        assert_eq!(err.message, "must be even");
        assert!(rule.parameters().is_none());
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some(&Value::Null)));
        assert!(!is_blank(Some(&json!(""))));
    }
}
