//! Error types for the model layer
//!
//! Every failure of a model operation is a [`ModelError`]. Callers that need
//! to present failures (an HTTP layer, a CLI) classify them with
//! [`ModelError::kind`] instead of matching on variants.

use modelize_validation::ValidationErrors;
use thiserror::Error;

use crate::events::LifecycleEvent;

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Result type alias for storage adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Error types for model operations
#[derive(Error, Debug, Clone)]
pub enum ModelError {
    /// The schema is incomplete; raised by `seal`, no model is produced
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// One or more field rules failed
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// A lifecycle callback returned halt or raised an error
    #[error("{message}")]
    CallbackHalted {
        event: LifecycleEvent,
        message: String,
    },

    /// The addressed record does not exist
    #[error("Record not found in table '{table}' with id '{id}'")]
    NotFound { table: String, id: String },

    /// The storage adapter failed
    #[error("Storage error: {0}")]
    Adapter(#[from] AdapterError),
}

/// Coarse classification of a [`ModelError`] for presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Incomplete model definition
    Configuration,
    /// The submitted record was rejected (validation or callback halt)
    Unprocessable,
    /// The addressed record does not exist
    NotFound,
    /// The backing store failed
    Storage,
}

impl ModelError {
    /// Create a configuration error
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        ModelError::Configuration(message.into())
    }

    /// Create a not found error
    pub fn not_found<T: Into<String>, I: Into<String>>(table: T, id: I) -> Self {
        ModelError::NotFound {
            table: table.into(),
            id: id.into(),
        }
    }

    /// Create a halted-callback error
    pub fn callback_halted<T: Into<String>>(event: LifecycleEvent, message: T) -> Self {
        ModelError::CallbackHalted {
            event,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ModelError::Configuration(_) => ErrorKind::Configuration,
            ModelError::Validation(_) | ModelError::CallbackHalted { .. } => {
                ErrorKind::Unprocessable
            }
            ModelError::NotFound { .. } => ErrorKind::NotFound,
            ModelError::Adapter(_) => ErrorKind::Storage,
        }
    }

    /// Human-readable detail messages: the failing rule messages for a
    /// validation error, the halt message for a callback error, nothing else.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ModelError::Validation(errors) => errors.messages(),
            ModelError::CallbackHalted { message, .. } => vec![message.clone()],
            _ => Vec::new(),
        }
    }
}

impl From<ValidationErrors> for ModelError {
    fn from(errors: ValidationErrors) -> Self {
        ModelError::Validation(errors)
    }
}

/// Errors raised by storage adapters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdapterError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),
}

impl AdapterError {
    pub fn backend<T: Into<String>>(message: T) -> Self {
        AdapterError::Backend(message.into())
    }
}
