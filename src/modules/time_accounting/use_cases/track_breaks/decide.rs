use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::modules::time_accounting::core::calculations::break_duration;
use crate::modules::time_accounting::core::errors::TimeAccountingError;
use crate::modules::time_accounting::core::events::TimeEvent;
use crate::modules::time_accounting::core::time_entry::{
    BreakLog, BreakStatus, EntryAction, TimeEntry,
};
use crate::shared::core::access::ensure_can_act_for;
use crate::shared::core::decision::Decision;
use crate::shared::core::directory::{Employee, TenantSettings};
use crate::shared::core::primitives::{AccessContext, EmployeeId};

#[derive(Debug)]
pub struct BreakState {
    pub employee: Option<Employee>,
    pub entry: Option<TimeEntry>,
    pub open_break: Option<BreakLog>,
    pub settings: TenantSettings,
}

pub fn decide_start_break(
    state: &BreakState,
    employee_id: EmployeeId,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Decision<TimeEvent, TimeAccountingError> {
    match start_break(state, employee_id, context, now) {
        Ok(event) => Decision::accept(vec![event], vec![]),
        Err(reason) => Decision::reject(reason),
    }
}

fn start_break(
    state: &BreakState,
    employee_id: EmployeeId,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Result<TimeEvent, TimeAccountingError> {
    let employee = state
        .employee
        .as_ref()
        .ok_or(TimeAccountingError::EmployeeNotFound(employee_id))?;
    ensure_can_act_for(context, employee)?;
    let entry = state.entry.as_ref().ok_or(TimeAccountingError::NoActiveShift)?;
    if state.open_break.is_some() {
        return Err(TimeAccountingError::BreakAlreadyOpen);
    }
    if entry.break_hours >= state.settings.max_break_hours {
        return Err(TimeAccountingError::BreakLimitReached(
            state.settings.max_break_hours,
        ));
    }
    let status = entry.status.apply(EntryAction::StartBreak)?;

    Ok(TimeEvent::BreakStarted {
        break_log: BreakLog {
            id: Uuid::now_v7(),
            tenant_id: entry.tenant_id,
            time_entry_id: entry.id,
            employee_id: entry.employee_id,
            break_start: now,
            break_end: None,
            break_hours: Decimal::ZERO,
            status: BreakStatus::Active,
        },
        entry: TimeEntry {
            status,
            version: entry.version + 1,
            ..entry.clone()
        },
    })
}

pub fn decide_end_break(
    state: &BreakState,
    employee_id: EmployeeId,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Decision<TimeEvent, TimeAccountingError> {
    match end_break(state, employee_id, context, now) {
        Ok(event) => Decision::accept(vec![event], vec![]),
        Err(reason) => Decision::reject(reason),
    }
}

fn end_break(
    state: &BreakState,
    employee_id: EmployeeId,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Result<TimeEvent, TimeAccountingError> {
    let employee = state
        .employee
        .as_ref()
        .ok_or(TimeAccountingError::EmployeeNotFound(employee_id))?;
    ensure_can_act_for(context, employee)?;
    let open = state.open_break.as_ref().ok_or(TimeAccountingError::NoOpenBreak)?;
    let entry = state
        .entry
        .as_ref()
        .filter(|entry| entry.id == open.time_entry_id)
        .ok_or(TimeAccountingError::NoActiveShift)?;
    let status = entry.status.apply(EntryAction::EndBreak)?;

    let (break_log, entry) = close_break(open, entry, now);
    Ok(TimeEvent::BreakEnded {
        break_log,
        entry: TimeEntry {
            status,
            version: entry.version + 1,
            ..entry
        },
    })
}

/// Close `open` at `at` and add its length to the entry's break total.
pub fn close_break(open: &BreakLog, entry: &TimeEntry, at: DateTime<Utc>) -> (BreakLog, TimeEntry) {
    let hours = break_duration(open.break_start, at);
    let closed = BreakLog {
        break_end: Some(at),
        break_hours: hours,
        status: BreakStatus::Completed,
        ..open.clone()
    };
    let entry = TimeEntry {
        break_hours: entry.break_hours + hours,
        ..entry.clone()
    };
    (closed, entry)
}
