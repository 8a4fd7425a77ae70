//! Error types for the pathway library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::PlanId;

/// Comprehensive error type for all pathway operations.
#[derive(Error, Debug)]
pub enum PathwayError {
    /// The remote service could not be reached or the request timed out
    #[error("Connection error: {message}")]
    Connectivity { message: String },
    /// The remote service answered with an unexpected status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    /// Login was rejected by the service
    #[error("{message}")]
    Authentication { message: String },
    /// Registration was rejected, optionally naming the offending field
    #[error("{message}")]
    Registration {
        message: String,
        field: Option<String>,
    },
    /// The generation pipeline reported an error for the plan
    #[error("Plan {plan_id} could not be generated. Please try again.")]
    Generation { plan_id: PlanId },
    /// An operation requiring a session was attempted while signed out
    #[error("Not signed in. Run `pathway auth login` first.")]
    NotSignedIn,
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: PlanId },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
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
    pub fn with_source(self, source: rusqlite::Error) -> PathwayError {
        PathwayError::Database {
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
    pub fn with_reason(self, reason: impl Into<String>) -> PathwayError {
        PathwayError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PathwayError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a connectivity error from any message.
    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::Connectivity {
            message: message.into(),
        }
    }

    /// Whether the error should be shown as a dismissible notice after which
    /// the user can simply try again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Connectivity { .. }
                | Self::Api { .. }
                | Self::Generation { .. }
                | Self::Authentication { .. }
                | Self::Registration { .. }
        )
    }
}

impl From<reqwest::Error> for PathwayError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => Self::Api {
                status: status.as_u16(),
                message: error.to_string(),
            },
            None if error.is_decode() => Self::Api {
                status: 200,
                message: format!("Malformed response body: {error}"),
            },
            None => Self::Connectivity {
                message: error.to_string(),
            },
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
        self.map_err(|e| PathwayError::database(message).with_source(e))
    }
}

/// Flattens the result of a blocking task, turning join failures into
/// configuration errors.
pub trait JoinResultExt<T> {
    /// Flatten a joined blocking task result.
    fn join_context(self) -> Result<T>;
}

impl<T> JoinResultExt<T> for std::result::Result<Result<T>, tokio::task::JoinError> {
    fn join_context(self) -> Result<T> {
        self.map_err(|e| PathwayError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}

/// Result type alias for pathway operations
pub type Result<T> = std::result::Result<T, PathwayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_builder() {
        let err = PathwayError::invalid_input("email").with_reason("must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'email': must not be empty"
        );
    }

    #[test]
    fn test_authentication_message_is_verbatim() {
        let err = PathwayError::Authentication {
            message: "Bad credentials".to_string(),
        };
        assert_eq!(err.to_string(), "Bad credentials");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_local_errors_are_not_recoverable_notices() {
        assert!(!PathwayError::NotSignedIn.is_recoverable());
        assert!(!PathwayError::XdgDirectory("missing".into()).is_recoverable());
    }

    #[test]
    fn test_generation_error_mentions_plan() {
        let err = PathwayError::Generation {
            plan_id: PlanId::new(7),
        };
        assert!(err.to_string().contains("Plan 7"));
    }
}
