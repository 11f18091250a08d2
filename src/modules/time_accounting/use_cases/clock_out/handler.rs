use chrono::Utc;

use crate::modules::time_accounting::adapters::outbound::repository;
use crate::modules::time_accounting::core::events::TimeEvent;
use crate::modules::time_accounting::core::time_entry::TimeEntry;
use crate::modules::time_accounting::use_cases::clock_in::handler::entry_of;
use crate::modules::time_accounting::use_cases::clock_out::command::ClockOut;
use crate::modules::time_accounting::use_cases::clock_out::decide::{
    ClockOutState, decide_clock_out,
};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{AccessContext, EmployeeId, TenantId};
use crate::shared::infrastructure::database::Tables;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::ports::Ports;

pub struct ClockOutHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    ports: Ports<TOutbox>,
}

impl<TOutbox> ClockOutHandler<TOutbox>
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
        command: ClockOut,
    ) -> Result<TimeEntry, ApplicationError> {
        let employee_id = command.employee_for(context);
        let mut transaction = self.ports.database.begin().await?;
        let state = load(transaction.tables(), context.tenant_id, employee_id);
        let (events, intents) =
            decide_clock_out(&state, &command, employee_id, context, Utc::now()).into_result()?;
        repository::apply_all(transaction.tables_mut(), &events)?;
        transaction.commit().await?;

        let entry = entry_of(&events)?;
        if events
            .iter()
            .any(|event| matches!(event, TimeEvent::ClockedOut { clamped: true, .. }))
        {
            tracing::warn!(
                entry_id = %entry.id,
                break_hours = %entry.break_hours,
                "breaks exceed the shift, worked hours clamped to zero"
            );
        }
        self.ports.publish(&entry.stream_id(), intents).await;
        tracing::info!(entry_id = %entry.id, total_hours = %entry.total_hours, "clocked out");
        Ok(entry)
    }
}

fn load(tables: &Tables, tenant_id: TenantId, employee_id: EmployeeId) -> ClockOutState {
    ClockOutState {
        employee: tables.employee(tenant_id, employee_id).cloned(),
        entry: repository::active_entry_for(tables, tenant_id, employee_id).cloned(),
        open_break: repository::open_break_for(tables, tenant_id, employee_id).cloned(),
        admins: repository::tenant_admins(tables, tenant_id),
    }
}
