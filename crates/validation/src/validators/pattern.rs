//! Pattern-based validators using regular expressions

use crate::error::{ValidationError, ValidationResult};
use crate::traits::{is_blank, ValidationRule};
use regex::Regex;
use serde_json::Value;

const EMAIL_PATTERN: &str = r"^\S+@\S+\.\S+$";

/// Validator for custom regular expression patterns
#[derive(Debug, Clone)]
pub struct PatternValidator {
    /// The regular expression pattern
    pattern: Regex,
    /// Custom error message
    pub message: Option<String>,
    /// Whether to match the entire string (default) or just find a match
    pub full_match: bool,
}

impl PatternValidator {
    /// Create a new pattern validator
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        Ok(Self::from_regex(regex))
    }

    /// Create a case-insensitive pattern validator
    pub fn new_case_insensitive(pattern: &str) -> Result<Self, regex::Error> {
        Self::new(&format!("(?i){}", pattern))
    }

    /// Create a validator from an existing Regex
    pub fn from_regex(regex: Regex) -> Self {
        Self {
            pattern: regex,
            message: None,
            full_match: true,
        }
    }

    /// Search-style validator: passes when `regex` matches anywhere in the
    /// value, failing with `message` otherwise. Anchor the regex to require a
    /// full match.
    pub fn format(regex: Regex, message: impl Into<String>) -> Self {
        Self::from_regex(regex).full_match(false).message(message)
    }

    /// Loose `local@domain.tld` check
    pub fn email() -> Self {
        let regex = Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex");
        Self::format(regex, "Invalid email format")
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set whether to match the full string or just find a match
    pub fn full_match(mut self, full_match: bool) -> Self {
        self.full_match = full_match;
        self
    }

    /// Get the pattern string
    pub fn pattern_string(&self) -> &str {
        self.pattern.as_str()
    }

    fn validate_pattern(&self, text: &str) -> bool {
        if self.full_match {
            self.pattern
                .find(text)
                .map_or(false, |m| m.start() == 0 && m.end() == text.len())
        } else {
            self.pattern.is_match(text)
        }
    }
}

impl ValidationRule for PatternValidator {
    fn validate(&self, value: Option<&Value>, field: &str) -> ValidationResult<()> {
        if is_blank(value) {
            return Ok(());
        }

        let text = value.and_then(Value::as_str).ok_or_else(|| {
            ValidationError::with_code(
                field,
                format!("{} must be a string for pattern validation", field),
                "invalid_type",
            )
        })?;

        if !self.validate_pattern(text) {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| format!("{} does not match the required pattern", field));

            return Err(ValidationError::with_code(field, message, "pattern_mismatch"));
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "pattern"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();
        params.insert(
            "pattern".to_string(),
            Value::String(self.pattern.as_str().to_string()),
        );
        params.insert("full_match".to_string(), Value::Bool(self.full_match));
        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }
        Some(Value::Object(params))
    }
}
