use std::collections::HashMap;

use chrono::Utc;
use serde::Serialize;

use crate::modules::scheduling::adapters::outbound::repository;
use crate::modules::scheduling::core::shift::ShiftAssignment;
use crate::modules::scheduling::use_cases::publish_shifts::command::{PublishFilter, PublishShifts};
use crate::modules::scheduling::use_cases::publish_shifts::decide::{PublishState, decide_publish};
use crate::shared::core::directory::Employee;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{AccessContext, EmployeeId, TenantId};
use crate::shared::infrastructure::database::Tables;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::ports::Ports;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishOutcome {
    pub published_shifts: usize,
    pub affected_employees: usize,
}

pub struct PublishShiftsHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    ports: Ports<TOutbox>,
}

impl<TOutbox> PublishShiftsHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    pub fn new(ports: Ports<TOutbox>) -> Self {
        Self { ports }
    }

    #[tracing::instrument(skip_all, fields(tenant_id = %context.tenant_id))]
    pub async fn handle(
        &self,
        context: &AccessContext,
        command: PublishShifts,
    ) -> Result<PublishOutcome, ApplicationError> {
        let mut transaction = self.ports.database.begin().await?;
        let state = load(transaction.tables(), context.tenant_id, &command.filter);
        let (events, intents) = decide_publish(&state, context, Utc::now()).into_result()?;
        repository::apply_all(transaction.tables_mut(), &events)?;
        transaction.commit().await?;

        let outcome = PublishOutcome {
            published_shifts: events.iter().map(|event| event.published().len()).sum(),
            affected_employees: intents.len(),
        };
        self.ports
            .publish(&format!("ShiftPublication-{}", context.tenant_id), intents)
            .await;
        tracing::info!(
            published = outcome.published_shifts,
            employees = outcome.affected_employees,
            "shifts published"
        );
        Ok(outcome)
    }
}

fn load(tables: &Tables, tenant_id: TenantId, filter: &PublishFilter) -> PublishState {
    let drafts: Vec<ShiftAssignment> = match filter {
        PublishFilter::ShiftIds(ids) => repository::drafts_with_ids(tables, tenant_id, ids)
            .cloned()
            .collect(),
        PublishFilter::DateRange { start, end } => {
            repository::drafts_between(tables, tenant_id, *start, *end)
                .cloned()
                .collect()
        }
    };
    PublishState {
        employees: employees_of(tables, tenant_id, drafts.iter().map(|draft| draft.employee_id)),
        drafts,
    }
}

pub(crate) fn employees_of(
    tables: &Tables,
    tenant_id: TenantId,
    ids: impl Iterator<Item = EmployeeId>,
) -> HashMap<EmployeeId, Employee> {
    ids.filter_map(|id| tables.employee(tenant_id, id))
        .map(|employee| (employee.id, employee.clone()))
        .collect()
}
