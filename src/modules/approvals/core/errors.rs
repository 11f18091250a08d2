use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::core::access::AccessError;
use crate::shared::core::errors::{ApplicationError, FieldError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApprovalError {
    #[error(transparent)]
    Forbidden(#[from] AccessError),

    #[error("time entry {0} not found")]
    EntryNotFound(Uuid),

    #[error("leave request {0} not found")]
    LeaveRequestNotFound(Uuid),

    #[error("swap request {0} not found")]
    SwapRequestNotFound(Uuid),

    #[error("employee {0} not found or inactive")]
    EmployeeNotFound(Uuid),

    #[error("shift assignment {0} not found")]
    AssignmentNotFound(Uuid),

    #[error("request is already decided ({0})")]
    NotPending(String),

    #[error("time entry is not completed yet")]
    NotCompleted,

    #[error("edit is only supported for timesheets")]
    UnsupportedVerdict,

    #[error("swapped shifts changed since the request was made")]
    SwapNoLongerValid,

    #[error("employee {employee_id} already has a shift on {date}")]
    SwapConflict { employee_id: Uuid, date: NaiveDate },

    #[error("leave request overlaps an existing request")]
    OverlappingLeave,

    #[error("invalid input")]
    Invalid(Vec<FieldError>),
}

impl ApprovalError {
    pub fn invalid(path: &str, message: &str) -> Self {
        ApprovalError::Invalid(vec![FieldError::new(path, message)])
    }
}

impl From<ApprovalError> for ApplicationError {
    fn from(error: ApprovalError) -> Self {
        match error {
            ApprovalError::Forbidden(access) => access.into(),
            ApprovalError::EntryNotFound(_)
            | ApprovalError::LeaveRequestNotFound(_)
            | ApprovalError::SwapRequestNotFound(_)
            | ApprovalError::EmployeeNotFound(_)
            | ApprovalError::AssignmentNotFound(_) => ApplicationError::NotFound(error.to_string()),
            ApprovalError::NotPending(_)
            | ApprovalError::NotCompleted
            | ApprovalError::SwapNoLongerValid => ApplicationError::InvalidState(error.to_string()),
            ApprovalError::SwapConflict { .. } | ApprovalError::OverlappingLeave => {
                ApplicationError::Conflict(error.to_string())
            }
            ApprovalError::UnsupportedVerdict => {
                ApplicationError::validation("action", error.to_string())
            }
            ApprovalError::Invalid(fields) => ApplicationError::Validation(fields),
        }
    }
}

#[cfg(test)]
mod approval_error_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_map_decided_requests_to_invalid_state() {
        let error = ApplicationError::from(ApprovalError::NotPending("Approved".into()));
        assert!(matches!(error, ApplicationError::InvalidState(_)));
    }

    #[rstest]
    fn it_should_keep_field_details_for_validation_errors() {
        let error = ApplicationError::from(ApprovalError::invalid(
            "rejection_reason",
            "a reason is required when rejecting",
        ));
        match error {
            ApplicationError::Validation(fields) => {
                assert_eq!(fields[0].path, "rejection_reason")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
