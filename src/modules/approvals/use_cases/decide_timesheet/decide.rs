use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::modules::approvals::core::errors::ApprovalError;
use crate::modules::approvals::core::events::ApprovalEvent;
use crate::modules::approvals::core::requests::{ApprovalEntity, ApprovalHistory};
use crate::modules::approvals::core::state::{ApprovalStatus, Verdict, rejection_reason};
use crate::modules::approvals::use_cases::decide_timesheet::command::DecideTimesheet;
use crate::modules::time_accounting::core::calculations::shift_totals;
use crate::modules::time_accounting::core::time_entry::{EntryStatus, TimeEntry};
use crate::shared::core::access::ensure_can_decide;
use crate::shared::core::decision::Decision;
use crate::shared::core::directory::{Employee, TenantSettings};
use crate::shared::core::notifications::{NotificationIntent, NotificationKind};
use crate::shared::core::primitives::AccessContext;

#[derive(Debug)]
pub struct TimesheetState {
    pub entry: Option<TimeEntry>,
    pub employee: Option<Employee>,
    pub settings: TenantSettings,
}

pub fn decide_timesheet(
    state: &TimesheetState,
    command: &DecideTimesheet,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Decision<ApprovalEvent, ApprovalError> {
    match settle(state, command, context, now) {
        Ok((event, intent)) => Decision::accept(vec![event], vec![intent]),
        Err(reason) => Decision::reject(reason),
    }
}

fn settle(
    state: &TimesheetState,
    command: &DecideTimesheet,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Result<(ApprovalEvent, NotificationIntent), ApprovalError> {
    let entry = state
        .entry
        .as_ref()
        .ok_or(ApprovalError::EntryNotFound(command.id))?;
    let employee = state
        .employee
        .as_ref()
        .ok_or(ApprovalError::EmployeeNotFound(entry.employee_id))?;
    ensure_can_decide(context, &state.settings, employee)?;
    if entry.status != EntryStatus::Completed {
        return Err(ApprovalError::NotCompleted);
    }
    let status = entry.approval_status.decide(command.action)?;
    let reason = rejection_reason(command.action, command.rejection_reason.as_deref())?;

    let decided = match command.action {
        Verdict::Reject => TimeEntry {
            approval_status: status,
            approved_by: Some(context.user_id),
            approved_at: Some(now),
            rejection_reason: reason.clone(),
            admin_notes: command.admin_notes.clone().or_else(|| entry.admin_notes.clone()),
            version: entry.version + 1,
            ..entry.clone()
        },
        Verdict::Approve | Verdict::Edit => {
            let base = if command.action == Verdict::Edit {
                retime(entry, command)?
            } else {
                entry.clone()
            };
            let hours = command.approved_hours.unwrap_or(base.total_hours);
            let rate = command.approved_rate.unwrap_or(employee.hourly_rate);
            if hours < Decimal::ZERO {
                return Err(ApprovalError::invalid("approved_hours", "hours cannot be negative"));
            }
            if rate < Decimal::ZERO {
                return Err(ApprovalError::invalid("approved_rate", "rate cannot be negative"));
            }
            TimeEntry {
                approval_status: status,
                approved_by: Some(context.user_id),
                approved_at: Some(now),
                approved_hours: Some(hours),
                approved_rate: Some(rate),
                total_pay: Some((hours * rate).round_dp(2)),
                admin_notes: command.admin_notes.clone().or_else(|| base.admin_notes.clone()),
                version: entry.version + 1,
                ..base
            }
        }
    };

    let history = ApprovalHistory::record(
        decided.tenant_id,
        ApprovalEntity::Timesheet,
        decided.id,
        context.user_id,
        status.as_str(),
        command.admin_notes.clone().or_else(|| reason.clone()),
        now,
    );
    let intent = notification_for(&decided, status);
    Ok((
        ApprovalEvent::TimesheetDecided {
            entry: decided,
            history,
        },
        intent,
    ))
}

/// Replace the clock times and breaks given by an edit and recompute totals.
fn retime(entry: &TimeEntry, command: &DecideTimesheet) -> Result<TimeEntry, ApprovalError> {
    let clock_in = command.clock_in.unwrap_or(entry.clock_in);
    let clock_out = command.clock_out.or(entry.clock_out).unwrap_or(clock_in);
    if clock_out <= clock_in {
        return Err(ApprovalError::invalid(
            "clock_out",
            "clock out must be after clock in",
        ));
    }
    let break_hours = command.break_hours.unwrap_or(entry.break_hours);
    if break_hours < Decimal::ZERO {
        return Err(ApprovalError::invalid(
            "break_hours",
            "break hours cannot be negative",
        ));
    }
    Ok(TimeEntry {
        clock_in,
        clock_out: Some(clock_out),
        break_hours,
        total_hours: shift_totals(clock_in, clock_out, break_hours).total_hours,
        ..entry.clone()
    })
}

fn notification_for(entry: &TimeEntry, status: ApprovalStatus) -> NotificationIntent {
    let day = entry.clock_in.date_naive();
    let (title, message) = match status {
        ApprovalStatus::Rejected => (
            "Timesheet rejected",
            format!(
                "Your shift on {day} was rejected: {}",
                entry.rejection_reason.as_deref().unwrap_or_default()
            ),
        ),
        ApprovalStatus::Edited => (
            "Timesheet approved with changes",
            format!("Your shift on {day} was adjusted and approved. {}", pay_summary(entry)),
        ),
        _ => (
            "Timesheet approved",
            format!("Your shift on {day} was approved. {}", pay_summary(entry)),
        ),
    };
    NotificationIntent::new(
        entry.tenant_id,
        entry.employee_id,
        NotificationKind::Timesheet,
        title,
        message,
    )
}

fn pay_summary(entry: &TimeEntry) -> String {
    format!(
        "{} hours at {} per hour, total {}.",
        entry.approved_hours.unwrap_or_default(),
        entry.approved_rate.unwrap_or_default(),
        entry.total_pay.unwrap_or_default()
    )
}
