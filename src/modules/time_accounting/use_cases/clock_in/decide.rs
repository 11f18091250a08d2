use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::modules::approvals::core::state::ApprovalStatus;
use crate::modules::scheduling::core::shift::ShiftAssignment;
use crate::modules::time_accounting::core::errors::TimeAccountingError;
use crate::modules::time_accounting::core::events::TimeEvent;
use crate::modules::time_accounting::core::time_entry::{EntryStatus, TimeEntry};
use crate::shared::core::access::ensure_can_act_for;
use crate::shared::core::decision::Decision;
use crate::shared::core::directory::Employee;
use crate::shared::core::primitives::{AccessContext, EmployeeId};

#[derive(Debug, Default)]
pub struct ClockInState {
    pub employee: Option<Employee>,
    pub active_entry: Option<TimeEntry>,
    /// Today's non-cancelled assignment of the employee.
    pub assignment: Option<ShiftAssignment>,
}

pub fn decide_clock_in(
    state: &ClockInState,
    employee_id: EmployeeId,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Decision<TimeEvent, TimeAccountingError> {
    let employee = match state.employee.as_ref().filter(|employee| employee.is_active) {
        Some(employee) => employee,
        None => return Decision::reject(TimeAccountingError::EmployeeNotFound(employee_id)),
    };
    if let Err(denied) = ensure_can_act_for(context, employee) {
        return Decision::reject(denied.into());
    }
    if state.active_entry.is_some() {
        return Decision::reject(TimeAccountingError::AlreadyClockedIn);
    }

    let entry = TimeEntry {
        id: Uuid::now_v7(),
        tenant_id: employee.tenant_id,
        employee_id: employee.id,
        assignment_id: state.assignment.as_ref().map(|assignment| assignment.id),
        clock_in: now,
        clock_out: None,
        break_hours: Decimal::ZERO,
        total_hours: Decimal::ZERO,
        status: EntryStatus::InProgress,
        approval_status: ApprovalStatus::Pending,
        approved_by: None,
        approved_at: None,
        approved_hours: None,
        approved_rate: None,
        total_pay: None,
        admin_notes: None,
        rejection_reason: None,
        total_calls_taken: 0,
        leads_generated: 0,
        shift_remarks: String::new(),
        performance_rating: None,
        version: 1,
    };
    Decision::accept(
        vec![
            TimeEvent::ClockedIn(entry),
            TimeEvent::PresenceChanged {
                tenant_id: employee.tenant_id,
                employee_id: employee.id,
                online: true,
            },
        ],
        vec![],
    )
}
