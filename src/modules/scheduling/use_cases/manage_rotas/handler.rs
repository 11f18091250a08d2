use chrono::Utc;
use serde::Serialize;

use crate::modules::scheduling::adapters::outbound::repository;
use crate::modules::scheduling::core::events::SchedulingEvent;
use crate::modules::scheduling::core::shift::{Rota, ShiftAssignment};
use crate::modules::scheduling::use_cases::manage_rotas::command::{
    CreateRota, PublishRota, RevertRota,
};
use crate::modules::scheduling::use_cases::manage_rotas::decide::{
    PublishRotaState, decide_create_rota, decide_publish_rota, decide_revert_rota,
};
use crate::modules::scheduling::use_cases::publish_shifts::handler::employees_of;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{AccessContext, TenantId};
use crate::shared::infrastructure::database::Tables;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::ports::Ports;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RotaPublication {
    pub rota: Rota,
    pub published_shifts: usize,
    pub affected_employees: usize,
}

pub struct RotaHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    ports: Ports<TOutbox>,
}

impl<TOutbox> RotaHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    pub fn new(ports: Ports<TOutbox>) -> Self {
        Self { ports }
    }

    #[tracing::instrument(skip_all, fields(tenant_id = %context.tenant_id))]
    pub async fn create(
        &self,
        context: &AccessContext,
        command: CreateRota,
    ) -> Result<Rota, ApplicationError> {
        let (events, _) = decide_create_rota(command, context, Utc::now()).into_result()?;
        self.ports
            .database
            .write(|tables| repository::apply_all(tables, &events))
            .await?;
        let rota = rota_of(&events)?;
        tracing::info!(rota_id = %rota.id, week = %rota.week_start_date, "rota created");
        Ok(rota)
    }

    #[tracing::instrument(skip_all, fields(tenant_id = %context.tenant_id, rota_id = %command.id))]
    pub async fn publish(
        &self,
        context: &AccessContext,
        command: PublishRota,
    ) -> Result<RotaPublication, ApplicationError> {
        let mut transaction = self.ports.database.begin().await?;
        let state = load(transaction.tables(), context.tenant_id, command);
        let (events, intents) =
            decide_publish_rota(&state, command, context, Utc::now()).into_result()?;
        repository::apply_all(transaction.tables_mut(), &events)?;
        transaction.commit().await?;

        let publication = RotaPublication {
            rota: rota_of(&events)?,
            published_shifts: events.iter().map(|event| event.published().len()).sum(),
            affected_employees: intents.len(),
        };
        self.ports
            .publish(&publication.rota.stream_id(), intents)
            .await;
        tracing::info!(
            published = publication.published_shifts,
            employees = publication.affected_employees,
            "rota published"
        );
        Ok(publication)
    }

    #[tracing::instrument(skip_all, fields(tenant_id = %context.tenant_id, rota_id = %command.id))]
    pub async fn revert(
        &self,
        context: &AccessContext,
        command: RevertRota,
    ) -> Result<Rota, ApplicationError> {
        let mut transaction = self.ports.database.begin().await?;
        let rota = repository::find_rota(transaction.tables(), context.tenant_id, command.id).cloned();
        let (events, _) = decide_revert_rota(rota.as_ref(), command, context).into_result()?;
        repository::apply_all(transaction.tables_mut(), &events)?;
        transaction.commit().await?;
        tracing::info!("rota reverted to draft");
        rota_of(&events)
    }
}

fn load(tables: &Tables, tenant_id: TenantId, command: PublishRota) -> PublishRotaState {
    let Some(rota) = repository::find_rota(tables, tenant_id, command.id) else {
        return PublishRotaState::default();
    };
    let drafts: Vec<ShiftAssignment> = repository::drafts_in_rota(tables, tenant_id, rota.id)
        .cloned()
        .collect();
    PublishRotaState {
        rota: Some(rota.clone()),
        employees: employees_of(tables, tenant_id, drafts.iter().map(|draft| draft.employee_id)),
        drafts,
    }
}

fn rota_of(events: &[SchedulingEvent]) -> Result<Rota, ApplicationError> {
    events
        .iter()
        .find_map(SchedulingEvent::rota)
        .cloned()
        .ok_or_else(|| ApplicationError::Unexpected("accepted rota change without a row".into()))
}
