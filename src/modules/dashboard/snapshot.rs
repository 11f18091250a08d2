// What a supervisor's dashboard shows at a glance. Every count is limited to
// the employees the caller may see.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::modules::approvals::core::state::{ApprovalStatus, RequestStatus};
use crate::modules::time_accounting::core::time_entry::EntryStatus;
use crate::shared::core::access::in_scope;
use crate::shared::core::primitives::{AccessContext, EmployeeId};
use crate::shared::infrastructure::database::Tables;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnlineEmployee {
    pub id: EmployeeId,
    pub name: String,
    pub on_break: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub online: Vec<OnlineEmployee>,
    pub pending_timesheets: usize,
    pub pending_leave_requests: usize,
    pub pending_swap_requests: usize,
}

pub fn snapshot(tables: &Tables, context: &AccessContext, now: DateTime<Utc>) -> DashboardSnapshot {
    let visible = |employee_id: EmployeeId| {
        tables
            .employee(context.tenant_id, employee_id)
            .is_some_and(|employee| in_scope(context, employee))
    };

    let mut online: Vec<OnlineEmployee> = tables
        .employees
        .values()
        .filter(|employee| employee.tenant_id == context.tenant_id && employee.is_online)
        .filter(|employee| in_scope(context, employee))
        .map(|employee| OnlineEmployee {
            id: employee.id,
            name: employee.name.clone(),
            on_break: tables.time_entries.values().any(|entry| {
                entry.tenant_id == context.tenant_id
                    && entry.employee_id == employee.id
                    && entry.status == EntryStatus::Break
            }),
        })
        .collect();
    online.sort_by(|a, b| a.name.cmp(&b.name));

    DashboardSnapshot {
        generated_at: now,
        online,
        pending_timesheets: tables
            .time_entries
            .values()
            .filter(|entry| entry.tenant_id == context.tenant_id)
            .filter(|entry| {
                entry.status == EntryStatus::Completed
                    && entry.approval_status == ApprovalStatus::Pending
            })
            .filter(|entry| visible(entry.employee_id))
            .count(),
        pending_leave_requests: tables
            .leave_requests
            .values()
            .filter(|request| request.tenant_id == context.tenant_id)
            .filter(|request| request.status == RequestStatus::Pending)
            .filter(|request| visible(request.employee_id))
            .count(),
        pending_swap_requests: tables
            .swap_requests
            .values()
            .filter(|request| request.tenant_id == context.tenant_id)
            .filter(|request| request.status == RequestStatus::Pending)
            .filter(|request| visible(request.requester_id))
            .count(),
    }
}
