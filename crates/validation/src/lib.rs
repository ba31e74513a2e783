//! # modelize-validation
//!
//! Field-level validation rules for modelize models. A rule looks at one
//! candidate value and either passes or fails with a human-readable message;
//! [`FieldRules`] runs every rule of every field and collects all failures.

pub mod error;
pub mod rules;
pub mod traits;
pub mod validators;

// Re-exports for easy access
pub use error::{ValidationError, ValidationErrors, ValidationResult};
pub use rules::{FieldRules, SharedRule};
pub use traits::{CreateValidationError, ValidationRule};

// Built-in validators
pub use validators::{
    custom::CustomValidator, length::LengthValidator, numeric::NumericValidator,
    pattern::PatternValidator, required::RequiredValidator,
};

/// Fails on absent or falsy values
pub fn required() -> RequiredValidator {
    RequiredValidator::new()
}

/// Fails when a string/array is shorter than `min`
pub fn min_length(min: usize) -> LengthValidator {
    LengthValidator::min_length(min)
}

/// Fails when a string/array is longer than `max`
pub fn max_length(max: usize) -> LengthValidator {
    LengthValidator::max_length(max)
}

/// Fails with `message` when `regex` finds no match
pub fn format(regex: regex::Regex, message: impl Into<String>) -> PatternValidator {
    PatternValidator::format(regex, message)
}
