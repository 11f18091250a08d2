// Week read model: one Monday-aligned week, grouped employee, then date.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::modules::scheduling::adapters::outbound::repository;
use crate::modules::scheduling::core::errors::SchedulingError;
use crate::modules::scheduling::core::shift::{EffectiveShift, ShiftAssignment};
use crate::modules::scheduling::core::state::AssignmentStatus;
use crate::modules::scheduling::use_cases::week_view::query::WeekViewQuery;
use crate::shared::core::access::in_scope;
use crate::shared::core::primitives::{AccessContext, EmployeeId, Role, week_start};
use crate::shared::infrastructure::database::Tables;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledShift {
    pub assignment_id: Uuid,
    pub date: NaiveDate,
    pub status: AssignmentStatus,
    pub rota_id: Option<Uuid>,
    pub notes: String,
    pub shift: EffectiveShift,
    pub scheduled_hours: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayShifts {
    pub date: NaiveDate,
    pub shifts: Vec<ScheduledShift>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeWeek {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub days: Vec<DayShifts>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekView {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub employees: Vec<EmployeeWeek>,
}

/// Status filter after the caller's role is taken into account. Employees
/// only ever see published shifts.
fn status_filter(
    context: &AccessContext,
    query: &WeekViewQuery,
) -> Result<Option<AssignmentStatus>, SchedulingError> {
    if context.role == Role::Employee {
        return Ok(Some(AssignmentStatus::Published));
    }
    match (query.published_only, query.show_drafts_only) {
        (true, true) => Err(SchedulingError::invalid(
            "show_drafts_only",
            "cannot be combined with published_only",
        )),
        (true, false) => Ok(Some(AssignmentStatus::Published)),
        (false, true) => Ok(Some(AssignmentStatus::Draft)),
        (false, false) => Ok(None),
    }
}

pub fn project_week(
    tables: &Tables,
    context: &AccessContext,
    anchor: NaiveDate,
    query: &WeekViewQuery,
) -> Result<WeekView, SchedulingError> {
    let status = status_filter(context, query)?;
    let start = week_start(anchor);
    let end = start + Duration::days(6);

    let wanted = |assignment: &&ShiftAssignment| {
        assignment.is_active()
            && status.is_none_or(|status| assignment.status == status)
            && query.employee_id.is_none_or(|id| assignment.employee_id == id)
            && query.rota_id.is_none_or(|id| assignment.rota_id == Some(id))
    };

    let mut grouped: BTreeMap<EmployeeId, BTreeMap<NaiveDate, Vec<ScheduledShift>>> =
        BTreeMap::new();
    for assignment in repository::assignments_between(tables, context.tenant_id, start, end).filter(wanted) {
        let visible = tables
            .employee(context.tenant_id, assignment.employee_id)
            .is_some_and(|employee| in_scope(context, employee));
        if !visible {
            continue;
        }
        // Rows whose template row vanished cannot be shown meaningfully.
        let Some(shift) = repository::effective_shift(tables, assignment) else {
            tracing::warn!(assignment_id = %assignment.id, "assignment without a resolvable shape");
            continue;
        };
        grouped
            .entry(assignment.employee_id)
            .or_default()
            .entry(assignment.date)
            .or_default()
            .push(ScheduledShift {
                assignment_id: assignment.id,
                date: assignment.date,
                status: assignment.status,
                rota_id: assignment.rota_id,
                notes: assignment.notes.clone(),
                scheduled_hours: shift.scheduled_hours(assignment.date),
                shift,
            });
    }

    let mut employees: Vec<EmployeeWeek> = grouped
        .into_iter()
        .map(|(employee_id, days)| EmployeeWeek {
            employee_id,
            employee_name: tables
                .employee(context.tenant_id, employee_id)
                .map(|employee| employee.name.clone())
                .unwrap_or_default(),
            days: days
                .into_iter()
                .map(|(date, mut shifts)| {
                    shifts.sort_by_key(|shift| shift.shift.start_time);
                    DayShifts { date, shifts }
                })
                .collect(),
        })
        .collect();
    employees.sort_by(|a, b| a.employee_name.cmp(&b.employee_name));

    Ok(WeekView {
        week_start: start,
        week_end: end,
        employees,
    })
}
