//! Error types for timeboard
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (unknown task, bad input, illegal status move)
//! - 4: Operation failed (storage write, lock contention)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the timeboard CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for timeboard operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::NotFound(_)
            | Error::InvalidInput(_)
            | Error::InvalidTransition { .. }
            | Error::InvalidConfig(_) => exit_codes::USER_ERROR,

            // Operation failures
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::LockFailed(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for timeboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_map_to_exit_code_2() {
        let errors = [
            Error::NotFound("task-x".to_string()),
            Error::InvalidInput("name cannot be empty".to_string()),
            Error::InvalidTransition {
                from: "Completed".to_string(),
                to: "New Task".to_string(),
            },
        ];
        for err in errors {
            assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        }
    }

    #[test]
    fn operation_failures_map_to_exit_code_4() {
        let err = Error::OperationFailed("disk full".to_string());
        assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);
    }

    #[test]
    fn json_error_carries_message_and_code() {
        let err = Error::NotFound("task-1".to_string());
        let json = JsonError::from(&err);
        assert_eq!(json.error, "Task not found: task-1");
        assert_eq!(json.code, exit_codes::USER_ERROR);
    }
}
