//! Typed error handling for fieldguard
//!
//! Every failure that can reach a client goes through [`GuardError`], which
//! knows its HTTP status and a stable error code.
//!
//! # Error Categories
//!
//! - [`ValidationErrors`]: declared constraints broken by the request (422)
//! - [`EntityError`]: lookups that found nothing (404)
//! - [`RequestError`]: requests that could not even be read (400)
//! - [`ConfigError`]: configuration parsing and checking
//! - [`StorageError`]: mock store failures
//!
//! # Example
//!
//! ```rust,ignore
//! async fn get_user(index: usize) -> Result<UserProfile, GuardError> {
//!     store.get(index).await?.ok_or_else(|| {
//!         EntityError::NotFound {
//!             entity_type: "user".to_string(),
//!             id: index.to_string(),
//!             detail: "User not found in memory".to_string(),
//!         }
//!         .into()
//!     })
//! }
//! ```

use crate::core::validation::ValidationErrors;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type
#[derive(Debug)]
pub enum GuardError {
    /// Declared constraints violated; never reaches handler code
    Validation(ValidationErrors),

    /// Entity lookups raised by handlers
    Entity(EntityError),

    /// Request could not be read at all
    Request(RequestError),

    /// Configuration errors
    Config(ConfigError),

    /// Mock store errors
    Storage(StorageError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for GuardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardError::Validation(e) => write!(f, "{}", e),
            GuardError::Entity(e) => write!(f, "{}", e),
            GuardError::Request(e) => write!(f, "{}", e),
            GuardError::Config(e) => write!(f, "{}", e),
            GuardError::Storage(e) => write!(f, "{}", e),
            GuardError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for GuardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GuardError::Validation(e) => Some(e),
            GuardError::Entity(e) => Some(e),
            GuardError::Request(e) => Some(e),
            GuardError::Config(e) => Some(e),
            GuardError::Storage(e) => Some(e),
            GuardError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl GuardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GuardError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GuardError::Entity(e) => e.status_code(),
            GuardError::Request(e) => e.status_code(),
            GuardError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GuardError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GuardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            GuardError::Validation(_) => "VALIDATION_FAILED",
            GuardError::Entity(e) => e.error_code(),
            GuardError::Request(e) => e.error_code(),
            GuardError::Config(_) => "CONFIG_ERROR",
            GuardError::Storage(_) => "STORAGE_ERROR",
            GuardError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.message(),
            details: self.details(),
        }
    }

    fn message(&self) -> String {
        match self {
            GuardError::Validation(e) => format!("{} field(s) failed validation", e.len()),
            GuardError::Entity(EntityError::NotFound { detail, .. }) => detail.clone(),
            other => other.to_string(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            GuardError::Validation(errors) => {
                Some(serde_json::json!({ "fields": errors.violations() }))
            }
            GuardError::Entity(EntityError::NotFound {
                entity_type, id, ..
            }) => Some(serde_json::json!({
                "entity_type": entity_type,
                "id": id
            })),
            _ => None,
        }
    }
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<ValidationErrors> for GuardError {
    fn from(err: ValidationErrors) -> Self {
        GuardError::Validation(err)
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors raised explicitly by handlers about stored entities
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    /// Nothing stored under the requested key
    #[error("{entity_type} with id '{id}' not found")]
    NotFound {
        entity_type: String,
        id: String,
        /// Message shown to the client
        detail: String,
    },
}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
        }
    }
}

impl From<EntityError> for GuardError {
    fn from(err: EntityError) -> Self {
        GuardError::Entity(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Requests the validation pipeline could not read
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Invalid path '{path}': {message}")]
    InvalidPath { path: String, message: String },

    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    #[error("Request body too large: {message}")]
    PayloadTooLarge { message: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidPath { .. } => StatusCode::BAD_REQUEST,
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            RequestError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidPath { .. } => "INVALID_PATH",
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
        }
    }
}

impl From<RequestError> for GuardError {
    fn from(err: RequestError) -> Self {
        GuardError::Request(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config{}: {message}", in_file(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },

    #[error("IO error: {message}")]
    IoError { message: String },
}

fn in_file(file: &Option<String>) -> String {
    match file {
        Some(file) => format!(" file '{}'", file),
        None => String::new(),
    }
}

impl From<ConfigError> for GuardError {
    fn from(err: ConfigError) -> Self {
        GuardError::Config(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the mock stores
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Store {operation} failed: {message}")]
    OperationFailed { operation: String, message: String },
}

impl StorageError {
    pub fn failed(operation: &str, err: impl fmt::Display) -> Self {
        StorageError::OperationFailed {
            operation: operation.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<StorageError> for GuardError {
    fn from(err: StorageError) -> Self {
        GuardError::Storage(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for GuardError {
    fn from(err: serde_json::Error) -> Self {
        GuardError::Internal(format!("JSON serialization failed: {}", err))
    }
}

impl From<std::io::Error> for GuardError {
    fn from(err: std::io::Error) -> Self {
        GuardError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for GuardError {
    fn from(err: serde_yaml::Error) -> Self {
        GuardError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<validator::ValidationErrors> for GuardError {
    fn from(err: validator::ValidationErrors) -> Self {
        GuardError::Config(ConfigError::InvalidValue {
            field: err
                .field_errors()
                .keys()
                .map(|k| k.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            message: err.to_string(),
        })
    }
}

/// Convert from anyhow::Error for store and builder code
impl From<anyhow::Error> for GuardError {
    fn from(err: anyhow::Error) -> Self {
        GuardError::Internal(err.to_string())
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for fieldguard operations
pub type GuardResult<T> = Result<T, GuardError>;

// =============================================================================
// Tests
// =============================================================================
