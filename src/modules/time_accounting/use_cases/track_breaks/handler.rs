use chrono::Utc;

use crate::modules::time_accounting::adapters::outbound::repository;
use crate::modules::time_accounting::core::time_entry::TimeEntry;
use crate::modules::time_accounting::use_cases::clock_in::handler::entry_of;
use crate::modules::time_accounting::use_cases::track_breaks::command::{EndBreak, StartBreak};
use crate::modules::time_accounting::use_cases::track_breaks::decide::{
    BreakState, decide_end_break, decide_start_break,
};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{AccessContext, EmployeeId, TenantId};
use crate::shared::infrastructure::database::Tables;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::ports::Ports;

pub struct BreakHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    ports: Ports<TOutbox>,
}

impl<TOutbox> BreakHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    pub fn new(ports: Ports<TOutbox>) -> Self {
        Self { ports }
    }

    #[tracing::instrument(skip_all, fields(tenant_id = %context.tenant_id))]
    pub async fn start(
        &self,
        context: &AccessContext,
        command: StartBreak,
    ) -> Result<TimeEntry, ApplicationError> {
        let employee_id = command.employee_for(context);
        let mut transaction = self.ports.database.begin().await?;
        let state = load(transaction.tables(), context.tenant_id, employee_id);
        let (events, _) =
            decide_start_break(&state, employee_id, context, Utc::now()).into_result()?;
        repository::apply_all(transaction.tables_mut(), &events)?;
        transaction.commit().await?;
        tracing::info!(employee_id = %employee_id, "break started");
        entry_of(&events)
    }

    #[tracing::instrument(skip_all, fields(tenant_id = %context.tenant_id))]
    pub async fn end(
        &self,
        context: &AccessContext,
        command: EndBreak,
    ) -> Result<TimeEntry, ApplicationError> {
        let employee_id = command.employee_for(context);
        let mut transaction = self.ports.database.begin().await?;
        let state = load(transaction.tables(), context.tenant_id, employee_id);
        let (events, _) = decide_end_break(&state, employee_id, context, Utc::now()).into_result()?;
        repository::apply_all(transaction.tables_mut(), &events)?;
        transaction.commit().await?;
        let entry = entry_of(&events)?;
        tracing::info!(employee_id = %employee_id, break_hours = %entry.break_hours, "break ended");
        Ok(entry)
    }
}

fn load(tables: &Tables, tenant_id: TenantId, employee_id: EmployeeId) -> BreakState {
    BreakState {
        employee: tables.employee(tenant_id, employee_id).cloned(),
        entry: repository::active_entry_for(tables, tenant_id, employee_id).cloned(),
        open_break: repository::open_break_for(tables, tenant_id, employee_id).cloned(),
        settings: tables.tenant_settings(tenant_id),
    }
}
