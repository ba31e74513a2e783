use std::fmt;

/// Error raised from inside a lifecycle callback.
///
/// The callback pipeline never lets this escape as-is: it is wrapped into a
/// halted-callback [`crate::ModelError`] tagged with the event that was
/// running.
#[derive(Debug, Clone, PartialEq)]
pub enum EventError {
    Validation { message: String },
    Observer { message: String },
    Storage { message: String },
}

impl EventError {
    pub fn validation(message: &str) -> Self {
        Self::Validation {
            message: message.to_string(),
        }
    }

    pub fn observer(message: &str) -> Self {
        Self::Observer {
            message: message.to_string(),
        }
    }

    pub fn storage(message: &str) -> Self {
        Self::Storage {
            message: message.to_string(),
        }
    }

    /// The bare message, without the category prefix
    pub fn message(&self) -> &str {
        match self {
            EventError::Validation { message }
            | EventError::Observer { message }
            | EventError::Storage { message } => message,
        }
    }
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for EventError {}

impl From<crate::error::AdapterError> for EventError {
    fn from(err: crate::error::AdapterError) -> Self {
        Self::storage(&err.to_string())
    }
}

impl From<crate::error::ModelError> for EventError {
    fn from(err: crate::error::ModelError) -> Self {
        Self::observer(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdapterError;

    #[test]
    fn test_event_error_validation() {
        let error = EventError::validation("Invalid email format");

        match error {
            EventError::Validation { ref message } => {
                assert_eq!(message, "Invalid email format");
            }
            _ => panic!("Expected validation error"),
        }
        assert_eq!(error.message(), "Invalid email format");
    }

    #[test]
    fn test_event_error_display_is_bare_message() {
        let error = EventError::observer("Observer failed to execute");
        assert_eq!(error.to_string(), "Observer failed to execute");
    }

    #[test]
    fn test_event_error_from_adapter_error() {
        let error: EventError = AdapterError::backend("connection reset").into();

        match error {
            EventError::Storage { message } => {
                assert!(message.contains("connection reset"));
            }
            _ => panic!("Expected storage error from adapter conversion"),
        }
    }
}
