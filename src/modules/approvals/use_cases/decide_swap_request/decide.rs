use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::approvals::core::errors::ApprovalError;
use crate::modules::approvals::core::events::ApprovalEvent;
use crate::modules::approvals::core::requests::{
    ApprovalEntity, ApprovalHistory, RequestDecision, ShiftSwapRequest,
};
use crate::modules::approvals::core::state::{RequestStatus, rejection_reason};
use crate::modules::scheduling::core::shift::ShiftAssignment;
use crate::shared::core::access::ensure_can_decide;
use crate::shared::core::decision::Decision;
use crate::shared::core::directory::{Employee, TenantSettings};
use crate::shared::core::notifications::{NotificationIntent, NotificationKind};
use crate::shared::core::primitives::AccessContext;

#[derive(Debug)]
pub struct SwapDecisionState {
    pub request: Option<ShiftSwapRequest>,
    pub requester: Option<Employee>,
    pub target: Option<Employee>,
    pub settings: TenantSettings,
    pub original: Option<ShiftAssignment>,
    pub requested: Option<ShiftAssignment>,
    /// Another live shift of the requester on the requested shift's date.
    pub requester_clash: Option<ShiftAssignment>,
    /// Another live shift of the target on the original shift's date.
    pub target_clash: Option<ShiftAssignment>,
}

pub fn decide_swap_request(
    state: &SwapDecisionState,
    id: Uuid,
    command: &RequestDecision,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Decision<ApprovalEvent, ApprovalError> {
    match decide(state, id, command, context, now) {
        Ok((event, intents)) => Decision::accept(vec![event], intents),
        Err(reason) => Decision::reject(reason),
    }
}

fn decide(
    state: &SwapDecisionState,
    id: Uuid,
    command: &RequestDecision,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Result<(ApprovalEvent, Vec<NotificationIntent>), ApprovalError> {
    let request = state
        .request
        .as_ref()
        .ok_or(ApprovalError::SwapRequestNotFound(id))?;
    let requester = state
        .requester
        .as_ref()
        .ok_or(ApprovalError::EmployeeNotFound(request.requester_id))?;
    let target = state
        .target
        .as_ref()
        .ok_or(ApprovalError::EmployeeNotFound(request.target_id))?;
    // Both parties must be in the caller's scope.
    ensure_can_decide(context, &state.settings, requester)?;
    ensure_can_decide(context, &state.settings, target)?;
    let status = request.status.decide(command.action)?;
    let reason = rejection_reason(command.action, command.rejection_reason.as_deref())?;

    let exchanged = if status == RequestStatus::Approved {
        exchange(state, request, now)?
    } else {
        Vec::new()
    };
    let decided = ShiftSwapRequest {
        status,
        approved_by: Some(context.user_id),
        decided_at: Some(now),
        rejection_reason: reason.clone(),
        ..request.clone()
    };
    let history = ApprovalHistory::record(
        decided.tenant_id,
        ApprovalEntity::SwapRequest,
        decided.id,
        context.user_id,
        status.as_str(),
        command.notes.clone().or_else(|| reason.clone()),
        now,
    );

    let intents = match reason {
        Some(reason) => vec![NotificationIntent::new(
            decided.tenant_id,
            decided.requester_id,
            NotificationKind::ShiftSwap,
            "Shift swap rejected",
            format!("Your shift swap request was rejected: {reason}"),
        )],
        None => [decided.requester_id, decided.target_id]
            .into_iter()
            .map(|recipient| {
                NotificationIntent::new(
                    decided.tenant_id,
                    recipient,
                    NotificationKind::ShiftSwap,
                    "Shift swap approved",
                    "Your shift swap was approved. Check your updated schedule.",
                )
                .with_action_url("/schedule")
            })
            .collect(),
    };

    Ok((
        ApprovalEvent::SwapDecided {
            request: decided,
            history,
            exchanged,
        },
        intents,
    ))
}

fn exchange(
    state: &SwapDecisionState,
    request: &ShiftSwapRequest,
    now: DateTime<Utc>,
) -> Result<Vec<ShiftAssignment>, ApprovalError> {
    let (Some(original), Some(requested)) = (&state.original, &state.requested) else {
        return Err(ApprovalError::SwapNoLongerValid);
    };
    let still_held = original.is_active()
        && requested.is_active()
        && original.employee_id == request.requester_id
        && requested.employee_id == request.target_id;
    if !still_held {
        return Err(ApprovalError::SwapNoLongerValid);
    }
    if state.target_clash.is_some() {
        return Err(ApprovalError::SwapConflict {
            employee_id: request.target_id,
            date: original.date,
        });
    }
    if state.requester_clash.is_some() {
        return Err(ApprovalError::SwapConflict {
            employee_id: request.requester_id,
            date: requested.date,
        });
    }
    let reassign = |assignment: &ShiftAssignment, employee_id: Uuid| ShiftAssignment {
        employee_id,
        updated_at: now,
        version: assignment.version + 1,
        ..assignment.clone()
    };
    Ok(vec![
        reassign(original, request.target_id),
        reassign(requested, request.requester_id),
    ])
}
