//! Built-in validators for common validation scenarios

pub mod custom;
pub mod length;
pub mod numeric;
pub mod pattern;
pub mod required;

pub use custom::CustomValidator;
pub use length::LengthValidator;
pub use numeric::NumericValidator;
pub use pattern::PatternValidator;
pub use required::RequiredValidator;
