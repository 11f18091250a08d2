use serde::Serialize;
use thiserror::Error;

use crate::shared::infrastructure::database::DatabaseError;

/// Field-level validation failure, reported as `details` in API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error(transparent)]
    Database(DatabaseError),

    #[error("unexpected: {0}")]
    Unexpected(String),
}

impl ApplicationError {
    pub fn validation(path: impl Into<String>, message: impl Into<String>) -> Self {
        ApplicationError::Validation(vec![FieldError::new(path, message)])
    }
}

/// Storage conflicts surface as domain conflicts. Everything else stays an
/// infrastructure failure.
impl From<DatabaseError> for ApplicationError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::VersionMismatch { .. } => {
                ApplicationError::Conflict("concurrent modification, retry the request".into())
            }
            DatabaseError::UniqueViolation { constraint } => {
                ApplicationError::Conflict(format!("unique constraint violated: {constraint}"))
            }
            other => ApplicationError::Database(other),
        }
    }
}
