use serde::Serialize;
use uuid::Uuid;

use crate::modules::discrepancies::adapters::outbound::repository;
use crate::modules::discrepancies::core::detector::{Discrepancy, detect};
use crate::modules::time_accounting::adapters::outbound::repository as time;
use crate::shared::core::access::in_scope;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::AccessContext;
use crate::shared::infrastructure::database::Tables;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryDiscrepancies {
    pub entry_id: Uuid,
    pub assignment_id: Option<Uuid>,
    pub discrepancies: Vec<Discrepancy>,
}

pub fn project_entry(
    tables: &Tables,
    context: &AccessContext,
    entry_id: Uuid,
) -> Result<EntryDiscrepancies, ApplicationError> {
    let not_found = || ApplicationError::NotFound(format!("time entry {entry_id} not found"));
    let entry = time::find_entry(tables, context.tenant_id, entry_id).ok_or_else(not_found)?;
    let visible = tables
        .employee(context.tenant_id, entry.employee_id)
        .is_some_and(|employee| in_scope(context, employee));
    if !visible {
        return Err(not_found());
    }

    let assignment = repository::assignment_for_entry(tables, entry);
    let window = assignment.and_then(|assignment| repository::scheduled_window(tables, assignment));
    Ok(EntryDiscrepancies {
        entry_id: entry.id,
        assignment_id: assignment.map(|assignment| assignment.id),
        discrepancies: detect(Some(entry), window.as_ref()),
    })
}
