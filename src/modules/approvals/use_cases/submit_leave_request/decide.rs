use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::approvals::core::errors::ApprovalError;
use crate::modules::approvals::core::events::ApprovalEvent;
use crate::modules::approvals::core::requests::LeaveRequest;
use crate::modules::approvals::core::state::RequestStatus;
use crate::modules::approvals::use_cases::submit_leave_request::command::SubmitLeaveRequest;
use crate::shared::core::access::ensure_can_act_for;
use crate::shared::core::decision::Decision;
use crate::shared::core::directory::Employee;
use crate::shared::core::notifications::{NotificationIntent, NotificationKind};
use crate::shared::core::primitives::{AccessContext, EmployeeId};

#[derive(Debug, Default)]
pub struct SubmitLeaveState {
    pub employee: Option<Employee>,
    /// Pending or approved leave of the employee overlapping the new dates.
    pub overlapping: Vec<LeaveRequest>,
    pub admins: Vec<EmployeeId>,
}

pub fn decide_submit_leave(
    state: &SubmitLeaveState,
    command: &SubmitLeaveRequest,
    employee_id: EmployeeId,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Decision<ApprovalEvent, ApprovalError> {
    match submit(state, command, employee_id, context, now) {
        Ok((request, intents)) => Decision::accept(vec![ApprovalEvent::LeaveRequested(request)], intents),
        Err(reason) => Decision::reject(reason),
    }
}

fn submit(
    state: &SubmitLeaveState,
    command: &SubmitLeaveRequest,
    employee_id: EmployeeId,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Result<(LeaveRequest, Vec<NotificationIntent>), ApprovalError> {
    if command.start_date > command.end_date {
        return Err(ApprovalError::invalid(
            "end_date",
            "end date must not be before the start date",
        ));
    }
    let employee = state
        .employee
        .as_ref()
        .ok_or(ApprovalError::EmployeeNotFound(employee_id))?;
    ensure_can_act_for(context, employee)?;
    if !state.overlapping.is_empty() {
        return Err(ApprovalError::OverlappingLeave);
    }

    let days_requested = (command.end_date - command.start_date).num_days() as u32 + 1;
    let request = LeaveRequest {
        id: Uuid::now_v7(),
        tenant_id: employee.tenant_id,
        employee_id: employee.id,
        leave_type: command.leave_type,
        start_date: command.start_date,
        end_date: command.end_date,
        days_requested,
        reason: command.reason.trim().to_string(),
        status: RequestStatus::Pending,
        approved_by: None,
        decided_at: None,
        rejection_reason: None,
        notes: None,
        created_at: now,
    };
    let intents = state
        .admins
        .iter()
        .map(|admin| {
            NotificationIntent::new(
                request.tenant_id,
                *admin,
                NotificationKind::Leave,
                "New leave request",
                format!(
                    "{} requested {} day(s) of {} leave from {} to {}.",
                    employee.name,
                    days_requested,
                    request.leave_type.as_str(),
                    request.start_date,
                    request.end_date
                ),
            )
            .with_action_url("/admin/leave-requests")
        })
        .collect();
    Ok((request, intents))
}
