use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::scheduling::core::errors::SchedulingError;
use crate::modules::scheduling::core::events::SchedulingEvent;
use crate::modules::scheduling::core::shift::{Rota, ShiftAssignment};
use crate::modules::scheduling::core::state::{RotaAction, RotaStatus};
use crate::modules::scheduling::use_cases::manage_rotas::command::{
    CreateRota, PublishRota, RevertRota,
};
use crate::modules::scheduling::use_cases::publish_shifts::decide::publish_drafts;
use crate::shared::core::access::ensure_can_manage_tenant;
use crate::shared::core::decision::Decision;
use crate::shared::core::directory::Employee;
use crate::shared::core::notifications::NotificationIntent;
use crate::shared::core::primitives::{AccessContext, EmployeeId, week_start};

pub fn decide_create_rota(
    command: CreateRota,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Decision<SchedulingEvent, SchedulingError> {
    if let Err(denied) = ensure_can_manage_tenant(context) {
        return Decision::reject(denied.into());
    }
    let name = command.name.trim();
    if name.is_empty() {
        return Decision::reject(SchedulingError::invalid("name", "name is required"));
    }
    let rota = Rota {
        id: Uuid::now_v7(),
        tenant_id: context.tenant_id,
        name: name.to_string(),
        week_start_date: week_start(command.week_start_date),
        status: RotaStatus::Draft,
        created_at: now,
        published_at: None,
        version: 1,
    };
    Decision::accept(vec![SchedulingEvent::RotaCreated(rota)], vec![])
}

#[derive(Debug, Default)]
pub struct PublishRotaState {
    pub rota: Option<Rota>,
    pub drafts: Vec<ShiftAssignment>,
    pub employees: HashMap<EmployeeId, Employee>,
}

pub fn decide_publish_rota(
    state: &PublishRotaState,
    command: PublishRota,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Decision<SchedulingEvent, SchedulingError> {
    match publish_rota(state, command, context, now) {
        Ok((events, intents)) => Decision::accept(events, intents),
        Err(reason) => Decision::reject(reason),
    }
}

fn publish_rota(
    state: &PublishRotaState,
    command: PublishRota,
    context: &AccessContext,
    now: DateTime<Utc>,
) -> Result<(Vec<SchedulingEvent>, Vec<NotificationIntent>), SchedulingError> {
    ensure_can_manage_tenant(context)?;
    let rota = state
        .rota
        .as_ref()
        .ok_or(SchedulingError::RotaNotFound(command.id))?;
    let status = rota.status.apply(RotaAction::Publish)?;

    // An empty rota can still be published.
    let (assignments, intents) = match publish_drafts(&state.drafts, &state.employees, context, now) {
        Ok(published) => published,
        Err(SchedulingError::NothingToPublish) => (Vec::new(), Vec::new()),
        Err(other) => return Err(other),
    };

    let published = Rota {
        status,
        published_at: Some(now),
        version: rota.version + 1,
        ..rota.clone()
    };
    Ok((
        vec![
            SchedulingEvent::RotaPublished(published),
            SchedulingEvent::ShiftsPublished { assignments },
        ],
        intents,
    ))
}

/// Back to draft so its assignments can be deleted again. Assignments keep
/// their own status.
pub fn decide_revert_rota(
    rota: Option<&Rota>,
    command: RevertRota,
    context: &AccessContext,
) -> Decision<SchedulingEvent, SchedulingError> {
    let reverted = ensure_can_manage_tenant(context)
        .map_err(SchedulingError::from)
        .and_then(|()| rota.ok_or(SchedulingError::RotaNotFound(command.id)))
        .and_then(|rota| {
            Ok(Rota {
                status: rota.status.apply(RotaAction::Revert)?,
                published_at: None,
                version: rota.version + 1,
                ..rota.clone()
            })
        });
    match reverted {
        Ok(rota) => Decision::accept(vec![SchedulingEvent::RotaReverted(rota)], vec![]),
        Err(reason) => Decision::reject(reason),
    }
}
