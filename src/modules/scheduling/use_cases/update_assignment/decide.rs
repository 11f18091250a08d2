use chrono::{DateTime, Utc};

use crate::modules::scheduling::core::errors::SchedulingError;
use crate::modules::scheduling::core::events::SchedulingEvent;
use crate::modules::scheduling::core::shift::{ShiftAssignment, ShiftTemplate};
use crate::modules::scheduling::core::state::{AssignmentAction, AssignmentTransition};
use crate::modules::scheduling::use_cases::update_assignment::command::UpdateAssignment;
use crate::shared::core::access::ensure_can_schedule;
use crate::shared::core::decision::Decision;
use crate::shared::core::directory::Employee;
use crate::shared::core::notifications::{NotificationIntent, NotificationKind};
use crate::shared::core::primitives::AccessContext;

#[derive(Debug, Default)]
pub struct UpdateState {
    pub assignment: Option<ShiftAssignment>,
    /// Employee currently holding the assignment.
    pub owner: Option<Employee>,
    /// Employee named by the update, when it differs from the owner.
    pub assignee: Option<Employee>,
    pub template: Option<ShiftTemplate>,
    /// Another active assignment on the target employee and date.
    pub clash: Option<ShiftAssignment>,
}

pub fn decide_update(
    state: &UpdateState,
    command: UpdateAssignment,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Decision<SchedulingEvent, SchedulingError> {
    match update(state, command, context, now) {
        Ok((assignment, intents)) => {
            Decision::accept(vec![SchedulingEvent::AssignmentUpdated(assignment)], intents)
        }
        Err(reason) => Decision::reject(reason),
    }
}

fn update(
    state: &UpdateState,
    command: UpdateAssignment,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Result<(ShiftAssignment, Vec<NotificationIntent>), SchedulingError> {
    let current = state
        .assignment
        .as_ref()
        .ok_or(SchedulingError::AssignmentNotFound(command.id))?;
    let owner = state
        .owner
        .as_ref()
        .ok_or(SchedulingError::EmployeeNotFound(current.employee_id))?;
    ensure_can_schedule(context, owner)?;

    let status = match current.status.apply(AssignmentAction::Edit)? {
        AssignmentTransition::To(status) => status,
        AssignmentTransition::Removed => {
            return Err(SchedulingError::InvalidTransition {
                from: format!("{:?}", current.status),
                action: "Edit".into(),
            });
        }
    };

    let employee_id = command.employee_id.unwrap_or(current.employee_id);
    if employee_id != current.employee_id {
        let assignee = state
            .assignee
            .as_ref()
            .filter(|employee| employee.id == employee_id && employee.is_active)
            .ok_or(SchedulingError::EmployeeNotFound(employee_id))?;
        ensure_can_schedule(context, assignee)?;
    }

    let shape = if command.shape.is_empty() {
        current.shape.clone()
    } else {
        let template_id = command.shape.template_id;
        let shape = command.shape.into_shape()?;
        if let Some(template_id) = template_id {
            state
                .template
                .as_ref()
                .filter(|template| template.id == template_id && template.is_active)
                .ok_or(SchedulingError::TemplateNotFound(template_id))?;
        }
        shape
    };

    let date = command.date.unwrap_or(current.date);
    if state.clash.is_some() {
        return Err(SchedulingError::AlreadyAssigned { employee_id, date });
    }

    let updated = ShiftAssignment {
        employee_id,
        date,
        shape,
        status,
        notes: command.notes.unwrap_or_else(|| current.notes.clone()),
        updated_at: now,
        version: current.version + 1,
        ..current.clone()
    };

    let intents = if current.is_published() {
        change_notices(current, &updated, command.emergency_mode)
    } else {
        Vec::new()
    };
    Ok((updated, intents))
}

fn change_notices(
    before: &ShiftAssignment,
    after: &ShiftAssignment,
    emergency: bool,
) -> Vec<NotificationIntent> {
    let title = if emergency {
        "Urgent shift change"
    } else {
        "Shift updated"
    };
    let mut intents = vec![
        NotificationIntent::new(
            after.tenant_id,
            after.employee_id,
            NotificationKind::ScheduleChange,
            title,
            format!("Your shift on {} has been updated.", after.date),
        )
        .with_action_url("/schedule")
        .urgent(emergency),
    ];
    if before.employee_id != after.employee_id {
        intents.push(
            NotificationIntent::new(
                before.tenant_id,
                before.employee_id,
                NotificationKind::ScheduleChange,
                title,
                format!("Your shift on {} has been reassigned.", before.date),
            )
            .with_action_url("/schedule")
            .urgent(emergency),
        );
    }
    intents
}
