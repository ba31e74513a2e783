//! Length-based validators for strings and collections

use crate::error::{ValidationError, ValidationResult};
use crate::traits::{is_blank, ValidationRule};
use serde_json::Value;

/// Validator for string/array length constraints
#[derive(Debug, Clone, Default)]
pub struct LengthValidator {
    /// Minimum length (inclusive)
    pub min: Option<usize>,
    /// Maximum length (inclusive)
    pub max: Option<usize>,
    /// Custom error message
    pub message: Option<String>,
}

impl LengthValidator {
    /// Create a new length validator with no constraints
    pub fn new() -> Self {
        Self {
            min: None,
            max: None,
            message: None,
        }
    }

    /// Validator requiring at least `min` characters
    pub fn min_length(min: usize) -> Self {
        Self::new().min(min)
    }

    /// Validator allowing at most `max` characters
    pub fn max_length(max: usize) -> Self {
        Self::new().max(max)
    }

    /// Set minimum length constraint
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    /// Set maximum length constraint
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Set length range (min and max)
    pub fn range(mut self, min: usize, max: usize) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Get the length of a value (supports strings and arrays)
    fn get_length(value: &Value) -> Option<usize> {
        match value {
            Value::String(s) => Some(s.chars().count()),
            Value::Array(arr) => Some(arr.len()),
            _ => None,
        }
    }

    fn error(&self, field: &str, default_message: String, code: &str) -> ValidationError {
        let message = self.message.clone().unwrap_or(default_message);
        ValidationError::with_code(field, message, code)
    }
}

impl ValidationRule for LengthValidator {
    fn validate(&self, value: Option<&Value>, field: &str) -> ValidationResult<()> {
        // Absence is the required rule's business
        let value = match value {
            Some(value) if !is_blank(Some(value)) => value,
            _ => return Ok(()),
        };

        let length = Self::get_length(value).ok_or_else(|| {
            self.error(
                field,
                format!("{} must be a string or array for length validation", field),
                "invalid_type",
            )
        })?;

        if let Some(min) = self.min {
            if length < min {
                return Err(self.error(field, format!("Minimum length is {}", min), "length_min"));
            }
        }

        if let Some(max) = self.max {
            if length > max {
                return Err(self.error(field, format!("Maximum length is {}", max), "length_max"));
            }
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "length"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        if let Some(min) = self.min {
            params.insert("min".to_string(), Value::from(min));
        }
        if let Some(max) = self.max {
            params.insert("max".to_string(), Value::from(max));
        }
        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }

        if params.is_empty() {
            None
        } else {
            Some(Value::Object(params))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_min_length() {
        let validator = LengthValidator::min_length(3);

        assert!(validator.validate(Some(&json!("Bob")), "name").is_ok());

        let error = validator.validate(Some(&json!("Bo")), "name").unwrap_err();
        assert_eq!(error.message, "Minimum length is 3");
        assert_eq!(error.code, "length_min");
    }

    #[test]
    fn test_max_length() {
        let validator = LengthValidator::max_length(5);

        assert!(validator.validate(Some(&json!("hello")), "name").is_ok());

        let error = validator.validate(Some(&json!("hello!")), "name").unwrap_err();
        assert_eq!(error.message, "Maximum length is 5");
        assert_eq!(error.code, "length_max");
    }

    #[test]
    fn test_unicode_counts_characters() {
        let validator = LengthValidator::new().range(2, 2);
        assert!(validator.validate(Some(&json!("日本")), "name").is_ok());
    }

    #[test]
    fn test_array_length() {
        let validator = LengthValidator::min_length(2);
        assert!(validator.validate(Some(&json!([1, 2])), "tags").is_ok());
        assert!(validator.validate(Some(&json!([1])), "tags").is_err());
    }

    #[test]
    fn test_absent_and_null_are_skipped() {
        let validator = LengthValidator::min_length(3);
        assert!(validator.validate(None, "name").is_ok());
        assert!(validator.validate(Some(&Value::Null), "name").is_ok());
    }

    #[test]
    fn test_invalid_type() {
        let validator = LengthValidator::min_length(3);
        let error = validator.validate(Some(&json!(42)), "name").unwrap_err();
        assert_eq!(error.code, "invalid_type");
    }

    #[test]
    fn test_custom_message_and_parameters() {
        let validator = LengthValidator::new().range(3, 100).message("Name length is off");
        let error = validator.validate(Some(&json!("ab")), "name").unwrap_err();
        assert_eq!(error.message, "Name length is off");
        assert_eq!(
            validator.parameters(),
            Some(json!({"min": 3, "max": 100, "message": "Name length is off"}))
        );
    }
}
