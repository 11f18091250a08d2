// Tenant-scoped reads for leave and swap requests, and the writes of decided
// approvals. Decisions touch rows owned by scheduling and time accounting;
// those go through the storage-level upserts so the uniqueness rules hold.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::modules::approvals::core::events::ApprovalEvent;
use crate::modules::approvals::core::requests::{LeaveRequest, ShiftSwapRequest};
use crate::modules::scheduling::core::shift::ShiftAssignment;
use crate::shared::core::primitives::{EmployeeId, TenantId};
use crate::shared::infrastructure::database::{DatabaseError, Tables};

pub fn find_leave_request(tables: &Tables, tenant_id: TenantId, id: Uuid) -> Option<&LeaveRequest> {
    tables
        .leave_requests
        .get(&id)
        .filter(|request| request.tenant_id == tenant_id)
}

pub fn find_swap_request(
    tables: &Tables,
    tenant_id: TenantId,
    id: Uuid,
) -> Option<&ShiftSwapRequest> {
    tables
        .swap_requests
        .get(&id)
        .filter(|request| request.tenant_id == tenant_id)
}

/// Pending or approved leave of an employee that overlaps `[start, end]`.
pub fn leave_overlapping(
    tables: &Tables,
    tenant_id: TenantId,
    employee_id: EmployeeId,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<LeaveRequest> {
    tables
        .leave_requests
        .values()
        .filter(|request| {
            request.tenant_id == tenant_id
                && request.employee_id == employee_id
                && request.status.holds_dates()
                && request.overlaps(start, end)
        })
        .cloned()
        .collect()
}

/// Non-cancelled assignments of an employee dated inside `[start, end]`.
pub fn active_assignments_of(
    tables: &Tables,
    tenant_id: TenantId,
    employee_id: EmployeeId,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<ShiftAssignment> {
    tables
        .assignments
        .values()
        .filter(|assignment| {
            assignment.tenant_id == tenant_id
                && assignment.employee_id == employee_id
                && assignment.is_active()
                && assignment.date >= start
                && assignment.date <= end
        })
        .cloned()
        .collect()
}

/// Another non-cancelled assignment of the employee on `date`, ignoring `except`.
pub fn other_active_assignment(
    tables: &Tables,
    tenant_id: TenantId,
    employee_id: EmployeeId,
    date: NaiveDate,
    except: Uuid,
) -> Option<&ShiftAssignment> {
    tables.assignments.values().find(|assignment| {
        assignment.id != except
            && assignment.tenant_id == tenant_id
            && assignment.employee_id == employee_id
            && assignment.date == date
            && assignment.is_active()
    })
}

pub fn apply(tables: &mut Tables, event: &ApprovalEvent) -> Result<(), DatabaseError> {
    match event {
        ApprovalEvent::TimesheetDecided { entry, history } => {
            tables.upsert_time_entry(entry.clone())?;
            tables.approval_history.push(history.clone());
        }
        ApprovalEvent::LeaveDecided {
            request,
            history,
            cancelled,
        } => {
            for assignment in cancelled {
                tables.upsert_assignment(assignment.clone())?;
            }
            tables.upsert_leave_request(request.clone())?;
            tables.approval_history.push(history.clone());
        }
        ApprovalEvent::SwapDecided {
            request,
            history,
            exchanged,
        } => {
            // Both rows leave before either returns, otherwise a same-day swap
            // trips the one-assignment-per-day check halfway through.
            for assignment in exchanged {
                tables.assignments.remove(&assignment.id);
            }
            for assignment in exchanged {
                tables.upsert_assignment(assignment.clone())?;
            }
            tables.swap_requests.insert(request.id, request.clone());
            tables.approval_history.push(history.clone());
        }
        ApprovalEvent::LeaveRequested(request) => {
            tables.upsert_leave_request(request.clone())?;
        }
        ApprovalEvent::SwapRequested(request) => {
            tables.swap_requests.insert(request.id, request.clone());
        }
    }
    Ok(())
}

pub fn apply_all(tables: &mut Tables, events: &[ApprovalEvent]) -> Result<(), DatabaseError> {
    events.iter().try_for_each(|event| apply(tables, event))
}
