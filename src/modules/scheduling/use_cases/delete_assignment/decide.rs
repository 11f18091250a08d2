use crate::modules::scheduling::core::errors::SchedulingError;
use crate::modules::scheduling::core::events::SchedulingEvent;
use crate::modules::scheduling::core::shift::{Rota, ShiftAssignment};
use crate::modules::scheduling::core::state::{AssignmentAction, AssignmentTransition};
use crate::modules::scheduling::use_cases::delete_assignment::command::DeleteAssignment;
use crate::shared::core::access::ensure_can_schedule;
use crate::shared::core::decision::Decision;
use crate::shared::core::directory::Employee;
use crate::shared::core::notifications::{NotificationIntent, NotificationKind};
use crate::shared::core::primitives::AccessContext;

#[derive(Debug, Default)]
pub struct DeleteState {
    pub assignment: Option<ShiftAssignment>,
    pub employee: Option<Employee>,
    pub rota: Option<Rota>,
}

pub fn decide_delete(
    state: &DeleteState,
    command: DeleteAssignment,
    context: &AccessContext,
) -> Decision<SchedulingEvent, SchedulingError> {
    match delete(state, command, context) {
        Ok((assignment, intents)) => {
            Decision::accept(vec![SchedulingEvent::AssignmentDeleted(assignment)], intents)
        }
        Err(reason) => Decision::reject(reason),
    }
}

fn delete(
    state: &DeleteState,
    command: DeleteAssignment,
    context: &AccessContext,
) -> Result<(ShiftAssignment, Vec<NotificationIntent>), SchedulingError> {
    let assignment = state
        .assignment
        .as_ref()
        .ok_or(SchedulingError::AssignmentNotFound(command.id))?;
    let employee = state
        .employee
        .as_ref()
        .ok_or(SchedulingError::EmployeeNotFound(assignment.employee_id))?;
    ensure_can_schedule(context, employee)?;

    let action = AssignmentAction::Delete {
        rota: state.rota.as_ref().map(|rota| rota.status),
    };
    if assignment.status.apply(action)? != AssignmentTransition::Removed {
        return Err(SchedulingError::InvalidTransition {
            from: format!("{:?}", assignment.status),
            action: "Delete".into(),
        });
    }

    let intents = if assignment.is_published() {
        vec![
            NotificationIntent::new(
                assignment.tenant_id,
                assignment.employee_id,
                NotificationKind::ScheduleChange,
                "Shift cancelled",
                format!("Your shift on {} has been removed from the schedule.", assignment.date),
            )
            .with_action_url("/schedule"),
        ]
    } else {
        Vec::new()
    };
    Ok((assignment.clone(), intents))
}
