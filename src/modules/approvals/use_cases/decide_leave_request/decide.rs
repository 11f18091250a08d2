use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::approvals::core::errors::ApprovalError;
use crate::modules::approvals::core::events::ApprovalEvent;
use crate::modules::approvals::core::requests::{
    ApprovalEntity, ApprovalHistory, LeaveRequest, RequestDecision,
};
use crate::modules::approvals::core::state::{RequestStatus, rejection_reason};
use crate::modules::scheduling::core::shift::ShiftAssignment;
use crate::modules::scheduling::core::state::{AssignmentAction, AssignmentTransition};
use crate::shared::core::access::ensure_can_decide;
use crate::shared::core::decision::Decision;
use crate::shared::core::directory::{Employee, TenantSettings};
use crate::shared::core::notifications::{NotificationIntent, NotificationKind};
use crate::shared::core::primitives::AccessContext;

pub const LEAVE_CANCELLATION_REASON: &str = "Employee on approved leave";

#[derive(Debug)]
pub struct LeaveDecisionState {
    pub request: Option<LeaveRequest>,
    pub employee: Option<Employee>,
    pub settings: TenantSettings,
    /// Non-cancelled assignments of the employee inside the leave dates.
    pub assignments: Vec<ShiftAssignment>,
}

pub fn decide_leave_request(
    state: &LeaveDecisionState,
    id: Uuid,
    command: &RequestDecision,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Decision<ApprovalEvent, ApprovalError> {
    match decide(state, id, command, context, now) {
        Ok((event, intent)) => Decision::accept(vec![event], vec![intent]),
        Err(reason) => Decision::reject(reason),
    }
}

fn decide(
    state: &LeaveDecisionState,
    id: Uuid,
    command: &RequestDecision,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Result<(ApprovalEvent, NotificationIntent), ApprovalError> {
    let request = state
        .request
        .as_ref()
        .ok_or(ApprovalError::LeaveRequestNotFound(id))?;
    let employee = state
        .employee
        .as_ref()
        .ok_or(ApprovalError::EmployeeNotFound(request.employee_id))?;
    ensure_can_decide(context, &state.settings, employee)?;
    let status = request.status.decide(command.action)?;
    let reason = rejection_reason(command.action, command.rejection_reason.as_deref())?;

    let cancelled = if status == RequestStatus::Approved {
        cancel_for_leave(&state.assignments, request, now)
    } else {
        Vec::new()
    };
    let decided = LeaveRequest {
        status,
        approved_by: Some(context.user_id),
        decided_at: Some(now),
        rejection_reason: reason.clone(),
        notes: command.notes.clone(),
        ..request.clone()
    };
    let history = ApprovalHistory::record(
        decided.tenant_id,
        ApprovalEntity::LeaveRequest,
        decided.id,
        context.user_id,
        status.as_str(),
        command.notes.clone().or_else(|| reason.clone()),
        now,
    );

    let range = format!("{} to {}", decided.start_date, decided.end_date);
    let intent = match reason {
        Some(reason) => NotificationIntent::new(
            decided.tenant_id,
            decided.employee_id,
            NotificationKind::Leave,
            "Leave request rejected",
            format!("Your leave from {range} was rejected: {reason}"),
        ),
        None => NotificationIntent::new(
            decided.tenant_id,
            decided.employee_id,
            NotificationKind::Leave,
            "Leave request approved",
            match cancelled.len() {
                0 => format!("Your leave from {range} was approved."),
                n => format!("Your leave from {range} was approved. {n} scheduled shift(s) were cancelled."),
            },
        ),
    };

    Ok((
        ApprovalEvent::LeaveDecided {
            request: decided,
            history,
            cancelled,
        },
        intent,
    ))
}

fn cancel_for_leave(
    assignments: &[ShiftAssignment],
    request: &LeaveRequest,
    now: DateTime<Utc>,
) -> Vec<ShiftAssignment> {
    assignments
        .iter()
        .filter(|assignment| assignment.employee_id == request.employee_id)
        .filter(|assignment| request.covers(assignment.date))
        .filter_map(|assignment| match assignment.status.apply(AssignmentAction::Cancel) {
            Ok(AssignmentTransition::To(status)) => Some(ShiftAssignment {
                status,
                cancellation_reason: Some(LEAVE_CANCELLATION_REASON.to_string()),
                updated_at: now,
                version: assignment.version + 1,
                ..assignment.clone()
            }),
            _ => None,
        })
        .collect()
}
