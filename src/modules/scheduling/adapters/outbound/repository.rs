// Tenant-scoped reads and writes for templates, rotas and assignments.
//
// Every read takes the tenant id; rows of other tenants are invisible.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::modules::scheduling::core::events::SchedulingEvent;
use crate::modules::scheduling::core::shift::{
    EffectiveShift, Rota, ShiftAssignment, ShiftTemplate,
};
use crate::modules::scheduling::core::state::AssignmentStatus;
use crate::shared::core::primitives::{EmployeeId, TenantId};
use crate::shared::infrastructure::database::{DatabaseError, Tables};

pub fn find_template(tables: &Tables, tenant_id: TenantId, id: Uuid) -> Option<&ShiftTemplate> {
    tables
        .templates
        .get(&id)
        .filter(|template| template.tenant_id == tenant_id)
}

pub fn list_templates(
    tables: &Tables,
    tenant_id: TenantId,
    include_inactive: bool,
) -> Vec<ShiftTemplate> {
    tables
        .templates
        .values()
        .filter(|template| template.tenant_id == tenant_id)
        .filter(|template| include_inactive || template.is_active)
        .cloned()
        .collect()
}

pub fn find_rota(tables: &Tables, tenant_id: TenantId, id: Uuid) -> Option<&Rota> {
    tables.rotas.get(&id).filter(|rota| rota.tenant_id == tenant_id)
}

pub fn find_assignment(tables: &Tables, tenant_id: TenantId, id: Uuid) -> Option<&ShiftAssignment> {
    tables
        .assignments
        .get(&id)
        .filter(|assignment| assignment.tenant_id == tenant_id)
}

/// The non-cancelled assignment of an employee on a date, if any.
pub fn active_assignment_for(
    tables: &Tables,
    tenant_id: TenantId,
    employee_id: EmployeeId,
    date: NaiveDate,
) -> Option<&ShiftAssignment> {
    tables.assignments.values().find(|assignment| {
        assignment.tenant_id == tenant_id
            && assignment.employee_id == employee_id
            && assignment.date == date
            && assignment.is_active()
    })
}

pub fn assignments_between(
    tables: &Tables,
    tenant_id: TenantId,
    start: NaiveDate,
    end: NaiveDate,
) -> impl Iterator<Item = &ShiftAssignment> {
    tables.assignments.values().filter(move |assignment| {
        assignment.tenant_id == tenant_id && assignment.date >= start && assignment.date <= end
    })
}

pub fn drafts_with_ids<'a>(
    tables: &'a Tables,
    tenant_id: TenantId,
    ids: &'a [Uuid],
) -> impl Iterator<Item = &'a ShiftAssignment> {
    ids.iter()
        .filter_map(move |id| find_assignment(tables, tenant_id, *id))
        .filter(|assignment| assignment.status == AssignmentStatus::Draft)
}

pub fn drafts_between(
    tables: &Tables,
    tenant_id: TenantId,
    start: NaiveDate,
    end: NaiveDate,
) -> impl Iterator<Item = &ShiftAssignment> {
    assignments_between(tables, tenant_id, start, end)
        .filter(|assignment| assignment.status == AssignmentStatus::Draft)
}

pub fn drafts_in_rota(
    tables: &Tables,
    tenant_id: TenantId,
    rota_id: Uuid,
) -> impl Iterator<Item = &ShiftAssignment> {
    tables.assignments.values().filter(move |assignment| {
        assignment.tenant_id == tenant_id
            && assignment.rota_id == Some(rota_id)
            && assignment.status == AssignmentStatus::Draft
    })
}

pub fn effective_shift(tables: &Tables, assignment: &ShiftAssignment) -> Option<EffectiveShift> {
    let template = assignment
        .shape
        .template_id()
        .and_then(|id| find_template(tables, assignment.tenant_id, id));
    EffectiveShift::resolve(&assignment.shape, template)
}

/// Persist the rows carried by accepted events.
pub fn apply(tables: &mut Tables, event: &SchedulingEvent) -> Result<(), DatabaseError> {
    match event {
        SchedulingEvent::TemplateCreated(template) | SchedulingEvent::TemplateDeactivated(template) => {
            tables.templates.insert(template.id, template.clone());
        }
        SchedulingEvent::RotaCreated(rota)
        | SchedulingEvent::RotaPublished(rota)
        | SchedulingEvent::RotaReverted(rota) => {
            tables.rotas.insert(rota.id, rota.clone());
        }
        SchedulingEvent::ShiftAssigned(assignment)
        | SchedulingEvent::AssignmentUpdated(assignment) => {
            tables.upsert_assignment(assignment.clone())?;
        }
        SchedulingEvent::ShiftsPublished { assignments } => {
            for assignment in assignments {
                tables.upsert_assignment(assignment.clone())?;
            }
        }
        SchedulingEvent::AssignmentDeleted(assignment) => {
            tables.assignments.remove(&assignment.id);
        }
    }
    Ok(())
}

pub fn apply_all(tables: &mut Tables, events: &[SchedulingEvent]) -> Result<(), DatabaseError> {
    events.iter().try_for_each(|event| apply(tables, event))
}
