use chrono::{DateTime, Utc};

use crate::modules::approvals::core::state::ApprovalStatus;
use crate::modules::time_accounting::core::calculations::shift_totals;
use crate::modules::time_accounting::core::errors::TimeAccountingError;
use crate::modules::time_accounting::core::events::TimeEvent;
use crate::modules::time_accounting::core::time_entry::{BreakLog, EntryAction, TimeEntry};
use crate::modules::time_accounting::use_cases::clock_out::command::ClockOut;
use crate::modules::time_accounting::use_cases::track_breaks::decide::close_break;
use crate::shared::core::access::ensure_can_act_for;
use crate::shared::core::decision::Decision;
use crate::shared::core::directory::Employee;
use crate::shared::core::notifications::{NotificationIntent, NotificationKind};
use crate::shared::core::primitives::{AccessContext, EmployeeId};

#[derive(Debug, Default)]
pub struct ClockOutState {
    pub employee: Option<Employee>,
    pub entry: Option<TimeEntry>,
    pub open_break: Option<BreakLog>,
    pub admins: Vec<EmployeeId>,
}

pub fn decide_clock_out(
    state: &ClockOutState,
    command: &ClockOut,
    employee_id: EmployeeId,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Decision<TimeEvent, TimeAccountingError> {
    match clock_out(state, command, employee_id, context, now) {
        Ok((events, intents)) => Decision::accept(events, intents),
        Err(reason) => Decision::reject(reason),
    }
}

fn clock_out(
    state: &ClockOutState,
    command: &ClockOut,
    employee_id: EmployeeId,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Result<(Vec<TimeEvent>, Vec<NotificationIntent>), TimeAccountingError> {
    if command
        .performance_rating
        .is_some_and(|rating| !(1..=5).contains(&rating))
    {
        return Err(TimeAccountingError::invalid(
            "performance_rating",
            "rating must be between 1 and 5",
        ));
    }
    let employee = state
        .employee
        .as_ref()
        .ok_or(TimeAccountingError::EmployeeNotFound(employee_id))?;
    ensure_can_act_for(context, employee)?;
    let entry = state.entry.as_ref().ok_or(TimeAccountingError::NoActiveEntry)?;
    let status = entry.status.apply(EntryAction::ClockOut)?;

    let (closed_break, entry) = match state
        .open_break
        .as_ref()
        .filter(|open| open.time_entry_id == entry.id)
    {
        Some(open) => {
            let (closed, entry) = close_break(open, entry, now);
            (Some(closed), entry)
        }
        None => (None, entry.clone()),
    };
    let totals = shift_totals(entry.clock_in, now, entry.break_hours);

    let finished = TimeEntry {
        clock_out: Some(now),
        total_hours: totals.total_hours,
        status,
        approval_status: ApprovalStatus::Pending,
        total_calls_taken: command.total_calls_taken.unwrap_or(entry.total_calls_taken),
        leads_generated: command.leads_generated.unwrap_or(entry.leads_generated),
        shift_remarks: command
            .shift_remarks
            .clone()
            .unwrap_or_else(|| entry.shift_remarks.clone()),
        performance_rating: command.performance_rating.or(entry.performance_rating),
        version: entry.version + 1,
        ..entry
    };

    let intents = state
        .admins
        .iter()
        .map(|admin| {
            NotificationIntent::new(
                finished.tenant_id,
                *admin,
                NotificationKind::Timesheet,
                "Shift needs approval",
                format!(
                    "{} clocked out after {} hours.",
                    employee.name, finished.total_hours
                ),
            )
            .with_action_url("/admin/shift-approvals")
        })
        .collect();

    Ok((
        vec![
            TimeEvent::ClockedOut {
                entry: finished,
                closed_break,
                clamped: totals.clamped,
            },
            TimeEvent::PresenceChanged {
                tenant_id: employee.tenant_id,
                employee_id: employee.id,
                online: false,
            },
        ],
        intents,
    ))
}
