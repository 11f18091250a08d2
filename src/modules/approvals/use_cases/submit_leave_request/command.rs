use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::approvals::core::requests::LeaveType;
use crate::shared::core::primitives::{AccessContext, EmployeeId};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmitLeaveRequest {
    /// Defaults to the caller.
    #[serde(default)]
    pub employee_id: Option<Uuid>,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: String,
}

impl SubmitLeaveRequest {
    pub fn employee_for(&self, context: &AccessContext) -> EmployeeId {
        self.employee_id.unwrap_or(context.user_id)
    }
}
