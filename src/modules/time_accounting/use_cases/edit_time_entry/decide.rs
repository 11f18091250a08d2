use rust_decimal::Decimal;

use crate::modules::approvals::core::state::ApprovalStatus;
use crate::modules::time_accounting::core::calculations::shift_totals;
use crate::modules::time_accounting::core::errors::TimeAccountingError;
use crate::modules::time_accounting::core::events::TimeEvent;
use crate::modules::time_accounting::core::time_entry::{EntryStatus, TimeEntry};
use crate::modules::time_accounting::use_cases::edit_time_entry::command::EditTimeEntry;
use crate::shared::core::access::ensure_can_schedule;
use crate::shared::core::decision::Decision;
use crate::shared::core::directory::Employee;
use crate::shared::core::primitives::AccessContext;

#[derive(Debug, Default)]
pub struct EditState {
    pub entry: Option<TimeEntry>,
    pub employee: Option<Employee>,
}

pub fn decide_edit(
    state: &EditState,
    command: EditTimeEntry,
    context: &AccessContext,
) -> Decision<TimeEvent, TimeAccountingError> {
    match edit(state, command, context) {
        Ok(entry) => Decision::accept(vec![TimeEvent::EntryEdited(entry)], vec![]),
        Err(reason) => Decision::reject(reason),
    }
}

fn edit(
    state: &EditState,
    command: EditTimeEntry,
    context: &AccessContext,
) -> Result<TimeEntry, TimeAccountingError> {
    let entry = state
        .entry
        .as_ref()
        .ok_or(TimeAccountingError::EntryNotFound(command.id))?;
    let employee = state
        .employee
        .as_ref()
        .ok_or(TimeAccountingError::EmployeeNotFound(entry.employee_id))?;
    ensure_can_schedule(context, employee)?;
    if entry.status != EntryStatus::Completed {
        return Err(TimeAccountingError::NotEditable("still running".into()));
    }
    if entry.approval_status != ApprovalStatus::Pending {
        return Err(TimeAccountingError::NotEditable(
            entry.approval_status.as_str().into(),
        ));
    }

    let clock_in = command.clock_in.unwrap_or(entry.clock_in);
    let clock_out = command.clock_out.or(entry.clock_out).unwrap_or(clock_in);
    if clock_out <= clock_in {
        return Err(TimeAccountingError::invalid(
            "clock_out",
            "clock out must be after clock in",
        ));
    }
    let break_hours = command.break_hours.unwrap_or(entry.break_hours);
    if break_hours < Decimal::ZERO {
        return Err(TimeAccountingError::invalid(
            "break_hours",
            "break hours cannot be negative",
        ));
    }

    let retimed = command.clock_in.is_some() || command.clock_out.is_some() || command.break_hours.is_some();
    let total_hours = if retimed {
        shift_totals(clock_in, clock_out, break_hours).total_hours
    } else {
        entry.total_hours
    };
    Ok(TimeEntry {
        clock_in,
        clock_out: Some(clock_out),
        break_hours,
        total_hours,
        approval_status: ApprovalStatus::Pending,
        shift_remarks: command
            .shift_remarks
            .unwrap_or_else(|| entry.shift_remarks.clone()),
        version: entry.version + 1,
        ..entry.clone()
    })
}
