// Table layout of the in-memory store, with the storage-level uniqueness rules
// a relational schema would declare as partial unique indexes.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::modules::approvals::core::requests::{ApprovalHistory, LeaveRequest, ShiftSwapRequest};
use crate::modules::scheduling::core::shift::{Rota, ShiftAssignment, ShiftTemplate};
use crate::modules::time_accounting::core::time_entry::{BreakLog, TimeEntry};
use crate::shared::core::directory::{Employee, TenantSettings};
use crate::shared::core::primitives::{EmployeeId, TenantId};
use crate::shared::infrastructure::database::DatabaseError;

pub const ONE_ASSIGNMENT_PER_DAY: &str = "shift_assignments_employee_date_active_key";
pub const ONE_ACTIVE_TIME_ENTRY: &str = "time_entries_employee_active_key";
pub const ONE_OPEN_BREAK: &str = "break_logs_employee_open_key";
pub const LEAVE_DATES_EXCLUSIVE: &str = "leave_requests_employee_dates_excl";

#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub tenants: BTreeMap<TenantId, TenantSettings>,
    pub employees: BTreeMap<EmployeeId, Employee>,
    pub templates: BTreeMap<Uuid, ShiftTemplate>,
    pub rotas: BTreeMap<Uuid, Rota>,
    pub assignments: BTreeMap<Uuid, ShiftAssignment>,
    pub time_entries: BTreeMap<Uuid, TimeEntry>,
    pub break_logs: BTreeMap<Uuid, BreakLog>,
    pub leave_requests: BTreeMap<Uuid, LeaveRequest>,
    pub swap_requests: BTreeMap<Uuid, ShiftSwapRequest>,
    pub approval_history: Vec<ApprovalHistory>,
}

impl Tables {
    pub fn tenant_settings(&self, tenant_id: TenantId) -> TenantSettings {
        self.tenants
            .get(&tenant_id)
            .cloned()
            .unwrap_or_else(|| TenantSettings::defaults_for(tenant_id))
    }

    pub fn employee(&self, tenant_id: TenantId, employee_id: EmployeeId) -> Option<&Employee> {
        self.employees
            .get(&employee_id)
            .filter(|employee| employee.tenant_id == tenant_id)
    }

    pub fn employee_mut(
        &mut self,
        tenant_id: TenantId,
        employee_id: EmployeeId,
    ) -> Option<&mut Employee> {
        self.employees
            .get_mut(&employee_id)
            .filter(|employee| employee.tenant_id == tenant_id)
    }

    pub fn upsert_assignment(&mut self, assignment: ShiftAssignment) -> Result<(), DatabaseError> {
        self.ensure_day_is_free(&assignment)?;
        self.assignments.insert(assignment.id, assignment);
        Ok(())
    }

    pub fn upsert_time_entry(&mut self, entry: TimeEntry) -> Result<(), DatabaseError> {
        self.ensure_no_other_active_entry(&entry)?;
        self.time_entries.insert(entry.id, entry);
        Ok(())
    }

    pub fn upsert_break_log(&mut self, break_log: BreakLog) -> Result<(), DatabaseError> {
        self.ensure_no_other_open_break(&break_log)?;
        self.break_logs.insert(break_log.id, break_log);
        Ok(())
    }

    pub fn upsert_leave_request(&mut self, request: LeaveRequest) -> Result<(), DatabaseError> {
        self.ensure_leave_dates_free(&request)?;
        self.leave_requests.insert(request.id, request);
        Ok(())
    }

    fn ensure_day_is_free(&self, assignment: &ShiftAssignment) -> Result<(), DatabaseError> {
        let taken = assignment.is_active()
            && self.assignments.values().any(|other| {
                other.id != assignment.id
                    && other.tenant_id == assignment.tenant_id
                    && other.employee_id == assignment.employee_id
                    && other.date == assignment.date
                    && other.is_active()
            });
        violation_if(taken, ONE_ASSIGNMENT_PER_DAY)
    }

    fn ensure_no_other_active_entry(&self, entry: &TimeEntry) -> Result<(), DatabaseError> {
        let taken = entry.status.is_active()
            && self.time_entries.values().any(|other| {
                other.id != entry.id
                    && other.tenant_id == entry.tenant_id
                    && other.employee_id == entry.employee_id
                    && other.status.is_active()
            });
        violation_if(taken, ONE_ACTIVE_TIME_ENTRY)
    }

    fn ensure_no_other_open_break(&self, break_log: &BreakLog) -> Result<(), DatabaseError> {
        let taken = break_log.break_end.is_none()
            && self.break_logs.values().any(|other| {
                other.id != break_log.id
                    && other.tenant_id == break_log.tenant_id
                    && other.employee_id == break_log.employee_id
                    && other.break_end.is_none()
            });
        violation_if(taken, ONE_OPEN_BREAK)
    }

    fn ensure_leave_dates_free(&self, request: &LeaveRequest) -> Result<(), DatabaseError> {
        let taken = request.status.holds_dates()
            && self.leave_requests.values().any(|other| {
                other.id != request.id
                    && other.tenant_id == request.tenant_id
                    && other.employee_id == request.employee_id
                    && other.status.holds_dates()
                    && other.overlaps(request.start_date, request.end_date)
            });
        violation_if(taken, LEAVE_DATES_EXCLUSIVE)
    }
}

fn violation_if(taken: bool, constraint: &str) -> Result<(), DatabaseError> {
    if taken {
        return Err(DatabaseError::UniqueViolation {
            constraint: constraint.into(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Tenants,
    Employees,
    Templates,
    Rotas,
    Assignments,
    TimeEntries,
    BreakLogs,
    LeaveRequests,
    SwapRequests,
}

/// Identity of a single row, the unit of write conflicts.
pub type RowKey = (Table, Uuid);

/// `None` marks a deleted row.
type RowChange<V> = (Uuid, Option<V>);

/// The rows one transaction wrote, relative to the snapshot it started from.
#[derive(Debug, Default)]
pub struct ChangeSet {
    tenants: Vec<RowChange<TenantSettings>>,
    employees: Vec<RowChange<Employee>>,
    templates: Vec<RowChange<ShiftTemplate>>,
    rotas: Vec<RowChange<Rota>>,
    assignments: Vec<RowChange<ShiftAssignment>>,
    time_entries: Vec<RowChange<TimeEntry>>,
    break_logs: Vec<RowChange<BreakLog>>,
    leave_requests: Vec<RowChange<LeaveRequest>>,
    swap_requests: Vec<RowChange<ShiftSwapRequest>>,
    approval_history: Vec<ApprovalHistory>,
}

impl ChangeSet {
    pub fn between(before: &Tables, after: &Tables) -> Self {
        Self {
            tenants: diff(&before.tenants, &after.tenants),
            employees: diff(&before.employees, &after.employees),
            templates: diff(&before.templates, &after.templates),
            rotas: diff(&before.rotas, &after.rotas),
            assignments: diff(&before.assignments, &after.assignments),
            time_entries: diff(&before.time_entries, &after.time_entries),
            break_logs: diff(&before.break_logs, &after.break_logs),
            leave_requests: diff(&before.leave_requests, &after.leave_requests),
            swap_requests: diff(&before.swap_requests, &after.swap_requests),
            // Audit rows are append-only.
            approval_history: after
                .approval_history
                .get(before.approval_history.len()..)
                .unwrap_or_default()
                .to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys().is_empty() && self.approval_history.is_empty()
    }

    /// Every row this change set writes or deletes. Appended audit rows are
    /// new identities and never conflict.
    pub fn keys(&self) -> Vec<RowKey> {
        [
            keys_of(Table::Tenants, &self.tenants),
            keys_of(Table::Employees, &self.employees),
            keys_of(Table::Templates, &self.templates),
            keys_of(Table::Rotas, &self.rotas),
            keys_of(Table::Assignments, &self.assignments),
            keys_of(Table::TimeEntries, &self.time_entries),
            keys_of(Table::BreakLogs, &self.break_logs),
            keys_of(Table::LeaveRequests, &self.leave_requests),
            keys_of(Table::SwapRequests, &self.swap_requests),
        ]
        .concat()
    }

    /// Replays the writes onto `tables`, then re-checks the unique
    /// constraints for every written row against the combined result.
    pub fn apply_to(&self, tables: &mut Tables) -> Result<(), DatabaseError> {
        replay(&mut tables.tenants, &self.tenants);
        replay(&mut tables.employees, &self.employees);
        replay(&mut tables.templates, &self.templates);
        replay(&mut tables.rotas, &self.rotas);
        replay(&mut tables.assignments, &self.assignments);
        replay(&mut tables.time_entries, &self.time_entries);
        replay(&mut tables.break_logs, &self.break_logs);
        replay(&mut tables.leave_requests, &self.leave_requests);
        replay(&mut tables.swap_requests, &self.swap_requests);
        tables
            .approval_history
            .extend(self.approval_history.iter().cloned());

        for assignment in written(&self.assignments) {
            tables.ensure_day_is_free(assignment)?;
        }
        for entry in written(&self.time_entries) {
            tables.ensure_no_other_active_entry(entry)?;
        }
        for break_log in written(&self.break_logs) {
            tables.ensure_no_other_open_break(break_log)?;
        }
        for request in written(&self.leave_requests) {
            tables.ensure_leave_dates_free(request)?;
        }
        Ok(())
    }
}

fn diff<V: Clone + PartialEq>(
    before: &BTreeMap<Uuid, V>,
    after: &BTreeMap<Uuid, V>,
) -> Vec<RowChange<V>> {
    let written = after
        .iter()
        .filter(|&(id, row)| before.get(id) != Some(row))
        .map(|(id, row)| (*id, Some(row.clone())));
    let deleted = before
        .keys()
        .filter(|id| !after.contains_key(id))
        .map(|id| (*id, None));
    written.chain(deleted).collect()
}

fn replay<V: Clone>(table: &mut BTreeMap<Uuid, V>, changes: &[RowChange<V>]) {
    for (id, row) in changes {
        match row {
            Some(row) => {
                table.insert(*id, row.clone());
            }
            None => {
                table.remove(id);
            }
        }
    }
}

fn written<V>(changes: &[RowChange<V>]) -> impl Iterator<Item = &V> {
    changes.iter().filter_map(|(_, row)| row.as_ref())
}

fn keys_of<V>(table: Table, changes: &[RowChange<V>]) -> Vec<RowKey> {
    changes.iter().map(|(id, _)| (table, *id)).collect()
}
