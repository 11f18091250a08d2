use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

use crate::modules::scheduling::core::errors::SchedulingError;
use crate::modules::scheduling::core::events::SchedulingEvent;
use crate::modules::scheduling::core::shift::ShiftAssignment;
use crate::modules::scheduling::core::state::{AssignmentAction, AssignmentTransition};
use crate::shared::core::access::{ensure_can_manage_tenant, in_scope};
use crate::shared::core::decision::Decision;
use crate::shared::core::directory::Employee;
use crate::shared::core::notifications::{NotificationIntent, NotificationKind};
use crate::shared::core::primitives::{AccessContext, EmployeeId};

#[derive(Debug, Default)]
pub struct PublishState {
    /// Draft assignments matched by the filter.
    pub drafts: Vec<ShiftAssignment>,
    pub employees: HashMap<EmployeeId, Employee>,
}

pub fn decide_publish(
    state: &PublishState,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Decision<SchedulingEvent, SchedulingError> {
    let published = ensure_can_manage_tenant(context)
        .map_err(SchedulingError::from)
        .and_then(|()| publish_drafts(&state.drafts, &state.employees, context, now));
    match published {
        Ok((assignments, intents)) => {
            Decision::accept(vec![SchedulingEvent::ShiftsPublished { assignments }], intents)
        }
        Err(reason) => Decision::reject(reason),
    }
}

/// Flip the drafts visible to the caller to published, with one notice per
/// distinct employee.
pub fn publish_drafts(
    drafts: &[ShiftAssignment],
    employees: &HashMap<EmployeeId, Employee>,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Result<(Vec<ShiftAssignment>, Vec<NotificationIntent>), SchedulingError> {
    let mut published = Vec::new();
    let mut per_employee: BTreeMap<EmployeeId, usize> = BTreeMap::new();
    for draft in drafts {
        let visible = employees
            .get(&draft.employee_id)
            .is_some_and(|employee| in_scope(context, employee));
        if !visible {
            continue;
        }
        let AssignmentTransition::To(status) = draft.status.apply(AssignmentAction::Publish)? else {
            continue;
        };
        *per_employee.entry(draft.employee_id).or_default() += 1;
        published.push(ShiftAssignment {
            status,
            updated_at: now,
            version: draft.version + 1,
            ..draft.clone()
        });
    }
    if published.is_empty() {
        return Err(SchedulingError::NothingToPublish);
    }

    let intents = per_employee
        .into_iter()
        .map(|(employee_id, count)| {
            NotificationIntent::new(
                context.tenant_id,
                employee_id,
                NotificationKind::Schedule,
                "Schedule published",
                format!("{count} shift(s) have been published for you."),
            )
            .with_action_url("/schedule")
        })
        .collect();
    Ok((published, intents))
}
