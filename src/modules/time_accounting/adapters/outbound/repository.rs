// Tenant-scoped reads and writes for time entries and break logs.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::modules::time_accounting::core::events::TimeEvent;
use crate::modules::time_accounting::core::time_entry::{BreakLog, TimeEntry};
use crate::shared::core::primitives::{EmployeeId, Role, TenantId};
use crate::shared::infrastructure::database::{DatabaseError, Tables};

pub fn find_entry(tables: &Tables, tenant_id: TenantId, id: Uuid) -> Option<&TimeEntry> {
    tables
        .time_entries
        .get(&id)
        .filter(|entry| entry.tenant_id == tenant_id)
}

/// The in-progress or on-break entry of an employee.
pub fn active_entry_for(
    tables: &Tables,
    tenant_id: TenantId,
    employee_id: EmployeeId,
) -> Option<&TimeEntry> {
    tables.time_entries.values().find(|entry| {
        entry.tenant_id == tenant_id && entry.employee_id == employee_id && entry.status.is_active()
    })
}

pub fn open_break_for(
    tables: &Tables,
    tenant_id: TenantId,
    employee_id: EmployeeId,
) -> Option<&BreakLog> {
    tables.break_logs.values().find(|break_log| {
        break_log.tenant_id == tenant_id
            && break_log.employee_id == employee_id
            && break_log.break_end.is_none()
    })
}

/// The entry worked against an assignment: linked explicitly, or failing
/// that the employee's first entry clocked in on the assignment's date.
pub fn entry_for_assignment(
    tables: &Tables,
    tenant_id: TenantId,
    assignment_id: Uuid,
    employee_id: EmployeeId,
    date: NaiveDate,
) -> Option<&TimeEntry> {
    let mine = || {
        tables
            .time_entries
            .values()
            .filter(move |entry| entry.tenant_id == tenant_id && entry.employee_id == employee_id)
    };
    mine()
        .find(|entry| entry.assignment_id == Some(assignment_id))
        .or_else(|| {
            mine()
                .filter(|entry| entry.assignment_id.is_none() && entry.clock_in.date_naive() == date)
                .min_by_key(|entry| entry.clock_in)
        })
}

pub fn tenant_admins(tables: &Tables, tenant_id: TenantId) -> Vec<EmployeeId> {
    tables
        .employees
        .values()
        .filter(|employee| {
            employee.tenant_id == tenant_id && employee.role == Role::Admin && employee.is_active
        })
        .map(|employee| employee.id)
        .collect()
}

pub fn apply(tables: &mut Tables, event: &TimeEvent) -> Result<(), DatabaseError> {
    if let Some(break_log) = event.break_log() {
        tables.upsert_break_log(break_log.clone())?;
    }
    match event {
        TimeEvent::PresenceChanged {
            tenant_id,
            employee_id,
            online,
        } => {
            if let Some(employee) = tables.employee_mut(*tenant_id, *employee_id) {
                employee.is_online = *online;
            }
        }
        _ => {
            if let Some(entry) = event.entry() {
                tables.upsert_time_entry(entry.clone())?;
            }
        }
    }
    Ok(())
}

pub fn apply_all(tables: &mut Tables, events: &[TimeEvent]) -> Result<(), DatabaseError> {
    events.iter().try_for_each(|event| apply(tables, event))
}
