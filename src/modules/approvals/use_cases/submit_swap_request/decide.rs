use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::approvals::core::errors::ApprovalError;
use crate::modules::approvals::core::events::ApprovalEvent;
use crate::modules::approvals::core::requests::ShiftSwapRequest;
use crate::modules::approvals::core::state::RequestStatus;
use crate::modules::approvals::use_cases::submit_swap_request::command::SubmitSwapRequest;
use crate::modules::scheduling::core::shift::ShiftAssignment;
use crate::shared::core::decision::Decision;
use crate::shared::core::directory::Employee;
use crate::shared::core::notifications::{NotificationIntent, NotificationKind};
use crate::shared::core::primitives::AccessContext;

#[derive(Debug, Default)]
pub struct SubmitSwapState {
    pub requester: Option<Employee>,
    pub target: Option<Employee>,
    pub original: Option<ShiftAssignment>,
    pub requested: Option<ShiftAssignment>,
}

pub fn decide_submit_swap(
    state: &SubmitSwapState,
    command: &SubmitSwapRequest,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Decision<ApprovalEvent, ApprovalError> {
    match submit(state, command, context, now) {
        Ok((request, intent)) => {
            Decision::accept(vec![ApprovalEvent::SwapRequested(request)], vec![intent])
        }
        Err(reason) => Decision::reject(reason),
    }
}

fn submit(
    state: &SubmitSwapState,
    command: &SubmitSwapRequest,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Result<(ShiftSwapRequest, NotificationIntent), ApprovalError> {
    let requester = state
        .requester
        .as_ref()
        .ok_or(ApprovalError::EmployeeNotFound(context.user_id))?;
    if command.target_id == requester.id {
        return Err(ApprovalError::invalid("target_id", "cannot swap a shift with yourself"));
    }
    let target = state
        .target
        .as_ref()
        .ok_or(ApprovalError::EmployeeNotFound(command.target_id))?;
    let original = state
        .original
        .as_ref()
        .ok_or(ApprovalError::AssignmentNotFound(command.original_shift_id))?;
    let requested = state
        .requested
        .as_ref()
        .ok_or(ApprovalError::AssignmentNotFound(command.requested_shift_id))?;
    if original.employee_id != requester.id || !original.is_active() {
        return Err(ApprovalError::invalid(
            "original_shift_id",
            "the shift is not one of your scheduled shifts",
        ));
    }
    if requested.employee_id != target.id || !requested.is_active() {
        return Err(ApprovalError::invalid(
            "requested_shift_id",
            "the shift is not scheduled for the target employee",
        ));
    }

    let request = ShiftSwapRequest {
        id: Uuid::now_v7(),
        tenant_id: requester.tenant_id,
        requester_id: requester.id,
        target_id: target.id,
        original_shift_id: original.id,
        requested_shift_id: requested.id,
        reason: command.reason.trim().to_string(),
        status: RequestStatus::Pending,
        approved_by: None,
        decided_at: None,
        rejection_reason: None,
        created_at: now,
    };
    let intent = NotificationIntent::new(
        request.tenant_id,
        target.id,
        NotificationKind::ShiftSwap,
        "Shift swap requested",
        format!(
            "{} would like to swap their shift on {} for yours on {}.",
            requester.name, original.date, requested.date
        ),
    );
    Ok((request, intent))
}
