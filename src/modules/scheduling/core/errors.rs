use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::core::access::AccessError;
use crate::shared::core::errors::{ApplicationError, FieldError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulingError {
    #[error(transparent)]
    Forbidden(#[from] AccessError),

    #[error("employee {0} not found or inactive")]
    EmployeeNotFound(Uuid),

    #[error("shift template {0} not found or inactive")]
    TemplateNotFound(Uuid),

    #[error("shift assignment {0} not found")]
    AssignmentNotFound(Uuid),

    #[error("rota {0} not found")]
    RotaNotFound(Uuid),

    #[error("employee {employee_id} already has a shift on {date}")]
    AlreadyAssigned { employee_id: Uuid, date: NaiveDate },

    #[error("nothing to publish")]
    NothingToPublish,

    #[error("assignment belongs to a published rota")]
    RotaPublished,

    #[error("transition {action} is not allowed from {from}")]
    InvalidTransition { from: String, action: String },

    #[error("invalid input")]
    Invalid(Vec<FieldError>),
}

impl SchedulingError {
    pub fn invalid(path: &str, message: &str) -> Self {
        SchedulingError::Invalid(vec![FieldError::new(path, message)])
    }
}

impl From<SchedulingError> for ApplicationError {
    fn from(error: SchedulingError) -> Self {
        match error {
            SchedulingError::Forbidden(access) => access.into(),
            SchedulingError::EmployeeNotFound(_)
            | SchedulingError::TemplateNotFound(_)
            | SchedulingError::AssignmentNotFound(_)
            | SchedulingError::RotaNotFound(_) => ApplicationError::NotFound(error.to_string()),
            SchedulingError::AlreadyAssigned { .. } => ApplicationError::Conflict(error.to_string()),
            SchedulingError::NothingToPublish
            | SchedulingError::RotaPublished
            | SchedulingError::InvalidTransition { .. } => {
                ApplicationError::InvalidState(error.to_string())
            }
            SchedulingError::Invalid(fields) => ApplicationError::Validation(fields),
        }
    }
}
