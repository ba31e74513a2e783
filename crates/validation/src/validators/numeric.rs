//! Numeric value validators

use crate::error::{ValidationError, ValidationResult};
use crate::traits::{is_blank, ValidationRule};
use serde_json::Value;

/// Validator for numeric constraints
#[derive(Debug, Clone, Default)]
pub struct NumericValidator {
    /// Minimum value (inclusive)
    pub min: Option<f64>,
    /// Maximum value (inclusive)
    pub max: Option<f64>,
    /// Allow only integers (no decimals)
    pub integer_only: bool,
    /// Custom error message
    pub message: Option<String>,
}

impl NumericValidator {
    /// Create a new numeric validator with default settings
    pub fn new() -> Self {
        Self {
            min: None,
            max: None,
            integer_only: false,
            message: None,
        }
    }

    /// Shorthand for `min(0.0)`
    pub fn non_negative() -> Self {
        Self::new().min(0.0)
    }

    /// Set minimum value constraint
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set maximum value constraint
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set value range (min and max)
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Require integer values only (no decimals)
    pub fn integer_only(mut self, integer_only: bool) -> Self {
        self.integer_only = integer_only;
        self
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn error(&self, field: &str, default_message: String, code: &str) -> ValidationError {
        let message = self.message.clone().unwrap_or(default_message);
        ValidationError::with_code(field, message, code)
    }
}

impl ValidationRule for NumericValidator {
    fn validate(&self, value: Option<&Value>, field: &str) -> ValidationResult<()> {
        if is_blank(value) {
            return Ok(());
        }

        // Only JSON numbers count; numeric strings are a type error
        let num = value.and_then(Value::as_f64).ok_or_else(|| {
            self.error(field, format!("{} must be a numeric value", field), "invalid_type")
        })?;

        if !num.is_finite() {
            return Err(self.error(
                field,
                format!("{} must be a finite number", field),
                "invalid_number",
            ));
        }

        if self.integer_only && num.fract() != 0.0 {
            return Err(self.error(field, format!("{} must be an integer", field), "not_integer"));
        }

        if let Some(min) = self.min {
            if num < min {
                return Err(self.error(
                    field,
                    format!("{} must be at least {}", field, min),
                    "numeric_min",
                ));
            }
        }

        if let Some(max) = self.max {
            if num > max {
                return Err(self.error(
                    field,
                    format!("{} must be at most {}", field, max),
                    "numeric_max",
                ));
            }
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "numeric"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        if let Some(min) = self.min {
            params.insert("min".to_string(), Value::from(min));
        }
        if let Some(max) = self.max {
            params.insert("max".to_string(), Value::from(max));
        }
        if self.integer_only {
            params.insert("integer_only".to_string(), Value::Bool(true));
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
