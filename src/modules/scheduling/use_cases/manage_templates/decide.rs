use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::scheduling::core::errors::SchedulingError;
use crate::modules::scheduling::core::events::SchedulingEvent;
use crate::modules::scheduling::core::shift::ShiftTemplate;
use crate::modules::scheduling::use_cases::manage_templates::command::{
    CreateTemplate, DeactivateTemplate,
};
use crate::shared::core::access::ensure_can_manage_tenant;
use crate::shared::core::decision::Decision;
use crate::shared::core::errors::FieldError;
use crate::shared::core::primitives::AccessContext;

pub fn decide_create_template(
    command: CreateTemplate,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Decision<SchedulingEvent, SchedulingError> {
    if let Err(denied) = ensure_can_manage_tenant(context) {
        return Decision::reject(denied.into());
    }

    let name = command.name.trim().to_string();
    let mut problems = Vec::new();
    if name.is_empty() {
        problems.push(FieldError::new("name", "name is required"));
    }
    if command.start_time == command.end_time {
        problems.push(FieldError::new(
            "end_time",
            "end time must differ from the start time",
        ));
    }
    if command.required_staff == Some(0) {
        problems.push(FieldError::new(
            "required_staff",
            "at least one staff member is required",
        ));
    }
    if !problems.is_empty() {
        return Decision::reject(SchedulingError::Invalid(problems));
    }

    let template = ShiftTemplate {
        id: Uuid::now_v7(),
        tenant_id: context.tenant_id,
        name,
        start_time: command.start_time,
        end_time: command.end_time,
        department: command.department,
        color: command.color,
        required_staff: command.required_staff.unwrap_or(1),
        is_active: true,
        created_at: now,
    };
    Decision::accept(vec![SchedulingEvent::TemplateCreated(template)], vec![])
}

/// Soft delete. Assignments already pointing at the template keep resolving.
pub fn decide_deactivate_template(
    template: Option<&ShiftTemplate>,
    command: DeactivateTemplate,
    context: &AccessContext,
) -> Decision<SchedulingEvent, SchedulingError> {
    if let Err(denied) = ensure_can_manage_tenant(context) {
        return Decision::reject(denied.into());
    }
    match template.filter(|template| template.is_active) {
        Some(template) => Decision::accept(
            vec![SchedulingEvent::TemplateDeactivated(ShiftTemplate {
                is_active: false,
                ..template.clone()
            })],
            vec![],
        ),
        None => Decision::reject(SchedulingError::TemplateNotFound(command.id)),
    }
}
