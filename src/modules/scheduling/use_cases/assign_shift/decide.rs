use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::scheduling::core::errors::SchedulingError;
use crate::modules::scheduling::core::events::SchedulingEvent;
use crate::modules::scheduling::core::shift::{Rota, ShiftAssignment, ShiftTemplate};
use crate::modules::scheduling::core::state::AssignmentStatus;
use crate::modules::scheduling::use_cases::assign_shift::command::AssignShift;
use crate::shared::core::access::ensure_can_schedule;
use crate::shared::core::decision::Decision;
use crate::shared::core::directory::Employee;
use crate::shared::core::primitives::AccessContext;

/// Rows the assignment is checked against, read in the deciding transaction.
#[derive(Debug, Default)]
pub struct AssignState {
    pub employee: Option<Employee>,
    pub template: Option<ShiftTemplate>,
    pub rota: Option<Rota>,
    pub existing: Option<ShiftAssignment>,
}

pub fn decide_assign(
    state: &AssignState,
    command: AssignShift,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Decision<SchedulingEvent, SchedulingError> {
    match assign(state, command, context, now) {
        Ok(assignment) => Decision::accept(vec![SchedulingEvent::ShiftAssigned(assignment)], vec![]),
        Err(reason) => Decision::reject(reason),
    }
}

fn assign(
    state: &AssignState,
    command: AssignShift,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Result<ShiftAssignment, SchedulingError> {
    let template_id = command.shape.template_id;
    let shape = command.shape.into_shape()?;

    let employee = state
        .employee
        .as_ref()
        .filter(|employee| employee.is_active)
        .ok_or(SchedulingError::EmployeeNotFound(command.employee_id))?;
    ensure_can_schedule(context, employee)?;

    // A supplied template must be usable even when an override wins.
    if let Some(template_id) = template_id {
        state
            .template
            .as_ref()
            .filter(|template| template.id == template_id && template.is_active)
            .ok_or(SchedulingError::TemplateNotFound(template_id))?;
    }
    if let Some(rota_id) = command.rota_id {
        state
            .rota
            .as_ref()
            .filter(|rota| rota.id == rota_id)
            .ok_or(SchedulingError::RotaNotFound(rota_id))?;
    }
    if state.existing.is_some() {
        return Err(SchedulingError::AlreadyAssigned {
            employee_id: employee.id,
            date: command.date,
        });
    }

    Ok(ShiftAssignment {
        id: Uuid::now_v7(),
        tenant_id: context.tenant_id,
        employee_id: employee.id,
        date: command.date,
        shape,
        status: AssignmentStatus::Draft,
        rota_id: command.rota_id,
        notes: command.notes.unwrap_or_default(),
        cancellation_reason: None,
        created_at: now,
        updated_at: now,
        version: 1,
    })
}
