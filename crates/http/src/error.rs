//! HTTP error types and the model error → status mapping

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use modelize_orm::{ErrorKind, ModelError};
use serde_json::json;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type for HTTP operations
pub type HttpResult<T> = Result<T, HttpError>;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Server startup failed: {message}")]
    StartupFailed { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid request: {message}")]
    BadRequest { message: String },

    #[error("{message}")]
    Unprocessable {
        message: String,
        details: Vec<String>,
    },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Internal server error: {message}")]
    InternalError { message: String },
}

impl HttpError {
    pub fn startup<T: Into<String>>(message: T) -> Self {
        HttpError::StartupFailed {
            message: message.into(),
        }
    }

    pub fn config<T: Into<String>>(message: T) -> Self {
        HttpError::ConfigError {
            message: message.into(),
        }
    }

    pub fn bad_request<T: Into<String>>(message: T) -> Self {
        HttpError::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found<T: Into<String>>(resource: T) -> Self {
        HttpError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal<T: Into<String>>(message: T) -> Self {
        HttpError::InternalError {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            HttpError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            HttpError::NotFound { .. } => StatusCode::NOT_FOUND,
            HttpError::StartupFailed { .. }
            | HttpError::ConfigError { .. }
            | HttpError::StorageError { .. }
            | HttpError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error code for consistent API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            HttpError::StartupFailed { .. } => "SERVER_STARTUP_FAILED",
            HttpError::ConfigError { .. } => "CONFIGURATION_ERROR",
            HttpError::BadRequest { .. } => "BAD_REQUEST",
            HttpError::Unprocessable { .. } => "VALIDATION_ERROR",
            HttpError::NotFound { .. } => "RESOURCE_NOT_FOUND",
            HttpError::StorageError { .. } => "STORAGE_ERROR",
            HttpError::InternalError { .. } => "INTERNAL_ERROR",
        }
    }

    /// Messages listed under `details` in the response body
    pub fn details(&self) -> &[String] {
        match self {
            HttpError::Unprocessable { details, .. } => details,
            _ => &[],
        }
    }
}

impl From<ModelError> for HttpError {
    fn from(error: ModelError) -> Self {
        match error.kind() {
            ErrorKind::Unprocessable => {
                let message = match error {
                    ModelError::Validation(_) => "Validation failed".to_string(),
                    ref other => other.to_string(),
                };
                HttpError::Unprocessable {
                    message,
                    details: error.messages(),
                }
            }
            ErrorKind::NotFound => match error {
                ModelError::NotFound { table, id } => {
                    HttpError::not_found(format!("{}/{}", table, id))
                }
                other => HttpError::not_found(other.to_string()),
            },
            ErrorKind::Configuration => HttpError::config(error.to_string()),
            ErrorKind::Storage => HttpError::StorageError {
                message: error.to_string(),
            },
        }
    }
}

impl From<ConfigError> for HttpError {
    fn from(error: ConfigError) -> Self {
        HttpError::config(error.to_string())
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        HttpError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }

        let body = json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "details": self.details(),
            }
        });

        (status, Json(body)).into_response()
    }
}
