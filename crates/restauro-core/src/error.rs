//! Error types for the restauro library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all restauro operations.
#[derive(Error, Debug)]
pub enum RestauroError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Step not found for the given identifier
    #[error("Step '{id}' not found")]
    StepNotFound { id: String },
    /// Task not found inside an existing step
    #[error("Task '{task_id}' not found in step '{step_id}'")]
    TaskNotFound { step_id: String, task_id: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// Failures reported by the hosted text-generation service
    #[error("Remote assistant error: {message}")]
    Remote { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> RestauroError {
        RestauroError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> RestauroError {
        RestauroError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl RestauroError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a failed blocking task join.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }
}

impl From<reqwest::Error> for RestauroError {
    fn from(error: reqwest::Error) -> Self {
        Self::Remote {
            message: error.to_string(),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| RestauroError::database(message).with_source(e))
    }
}

/// Result type alias for restauro operations
pub type Result<T> = std::result::Result<T, RestauroError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_not_found_message_names_both_ids() {
        let err = RestauroError::TaskNotFound {
            step_id: "step1".to_string(),
            task_id: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "Task 'missing' not found in step 'step1'");
    }

    #[test]
    fn test_invalid_input_builder() {
        let err = RestauroError::invalid_input("resolution").with_reason("expected WxH");
        assert!(matches!(err, RestauroError::InvalidInput { ref field, .. } if field == "resolution"));
        assert!(err.to_string().contains("expected WxH"));
    }

    #[test]
    fn test_db_context_wraps_source() {
        let result: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::InvalidQuery);
        let err = result.db_context("Failed to read record").unwrap_err();
        assert!(err.to_string().starts_with("Database error: Failed to read record"));
    }
}
