use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::modules::discrepancies::adapters::outbound::repository;
use crate::modules::discrepancies::core::detector::{Discrepancy, detect};
use crate::modules::scheduling::adapters::outbound::repository as scheduling;
use crate::modules::time_accounting::adapters::outbound::repository as time;
use crate::shared::core::access::{ensure_can_manage_tenant, in_scope};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{AccessContext, EmployeeId};
use crate::shared::infrastructure::database::Tables;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftDiscrepancies {
    pub assignment_id: Uuid,
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub entry_id: Option<Uuid>,
    pub discrepancies: Vec<Discrepancy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub shifts_checked: usize,
    pub flagged: Vec<ShiftDiscrepancies>,
}

/// Every published shift of the day in the caller's scope, checked against
/// what was clocked. Shifts without findings are counted but not listed.
/// Unworked shifts that have not started by `now` are left out.
pub fn project_day(
    tables: &Tables,
    context: &AccessContext,
    date: NaiveDate,
    now: DateTime<Utc>,
) -> Result<DailyReport, ApplicationError> {
    ensure_can_manage_tenant(context)?;
    let mut shifts_checked = 0;
    let mut flagged = Vec::new();
    for assignment in scheduling::assignments_between(tables, context.tenant_id, date, date)
        .filter(|assignment| assignment.is_published())
    {
        let Some(employee) = tables
            .employee(context.tenant_id, assignment.employee_id)
            .filter(|employee| in_scope(context, employee))
        else {
            continue;
        };
        let entry = time::entry_for_assignment(
            tables,
            context.tenant_id,
            assignment.id,
            assignment.employee_id,
            assignment.date,
        );
        let window = repository::scheduled_window(tables, assignment);
        let upcoming = window.as_ref().is_some_and(|window| window.start > now);
        if entry.is_none() && upcoming {
            continue;
        }
        shifts_checked += 1;
        let discrepancies = detect(entry, window.as_ref());
        if discrepancies.is_empty() {
            continue;
        }
        flagged.push(ShiftDiscrepancies {
            assignment_id: assignment.id,
            employee_id: employee.id,
            employee_name: employee.name.clone(),
            entry_id: entry.map(|entry| entry.id),
            discrepancies,
        });
    }
    flagged.sort_by(|a, b| a.employee_name.cmp(&b.employee_name));
    Ok(DailyReport {
        date,
        shifts_checked,
        flagged,
    })
}
