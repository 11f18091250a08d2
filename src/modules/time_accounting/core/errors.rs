use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::core::access::AccessError;
use crate::shared::core::errors::{ApplicationError, FieldError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeAccountingError {
    #[error(transparent)]
    Forbidden(#[from] AccessError),

    #[error("employee {0} not found or inactive")]
    EmployeeNotFound(Uuid),

    #[error("time entry {0} not found")]
    EntryNotFound(Uuid),

    #[error("employee is already clocked in")]
    AlreadyClockedIn,

    #[error("no active shift")]
    NoActiveShift,

    #[error("no active shift to clock out from")]
    NoActiveEntry,

    #[error("a break is already in progress")]
    BreakAlreadyOpen,

    #[error("no break in progress")]
    NoOpenBreak,

    #[error("maximum break time of {0} hours already taken")]
    BreakLimitReached(Decimal),

    #[error("time entry is {0} and can no longer be edited")]
    NotEditable(String),

    #[error("transition {action} is not allowed from {from}")]
    InvalidTransition { from: String, action: String },

    #[error("invalid input")]
    Invalid(Vec<FieldError>),
}

impl TimeAccountingError {
    pub fn invalid(path: &str, message: &str) -> Self {
        TimeAccountingError::Invalid(vec![FieldError::new(path, message)])
    }
}

impl From<TimeAccountingError> for ApplicationError {
    fn from(error: TimeAccountingError) -> Self {
        match error {
            TimeAccountingError::Forbidden(access) => access.into(),
            TimeAccountingError::EmployeeNotFound(_)
            | TimeAccountingError::EntryNotFound(_)
            | TimeAccountingError::NoActiveEntry
            | TimeAccountingError::NoOpenBreak => ApplicationError::NotFound(error.to_string()),
            TimeAccountingError::AlreadyClockedIn | TimeAccountingError::BreakAlreadyOpen => {
                ApplicationError::Conflict(error.to_string())
            }
            TimeAccountingError::NoActiveShift
            | TimeAccountingError::BreakLimitReached(_)
            | TimeAccountingError::NotEditable(_)
            | TimeAccountingError::InvalidTransition { .. } => {
                ApplicationError::InvalidState(error.to_string())
            }
            TimeAccountingError::Invalid(fields) => ApplicationError::Validation(fields),
        }
    }
}
