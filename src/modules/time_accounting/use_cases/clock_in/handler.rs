use chrono::{NaiveDate, Utc};

use crate::modules::scheduling::adapters::outbound::repository as scheduling;
use crate::modules::time_accounting::adapters::outbound::repository;
use crate::modules::time_accounting::core::events::TimeEvent;
use crate::modules::time_accounting::core::time_entry::TimeEntry;
use crate::modules::time_accounting::use_cases::clock_in::command::ClockIn;
use crate::modules::time_accounting::use_cases::clock_in::decide::{ClockInState, decide_clock_in};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{AccessContext, EmployeeId, TenantId};
use crate::shared::infrastructure::database::Tables;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::ports::Ports;

pub struct ClockInHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    ports: Ports<TOutbox>,
}

impl<TOutbox> ClockInHandler<TOutbox>
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
        command: ClockIn,
    ) -> Result<TimeEntry, ApplicationError> {
        let employee_id = command.employee_for(context);
        let now = Utc::now();
        let mut transaction = self.ports.database.begin().await?;
        let state = load(transaction.tables(), context.tenant_id, employee_id, now.date_naive());
        let (events, _) = decide_clock_in(&state, employee_id, context, now).into_result()?;
        repository::apply_all(transaction.tables_mut(), &events)?;
        transaction.commit().await?;

        let entry = entry_of(&events)?;
        tracing::info!(employee_id = %employee_id, entry_id = %entry.id, "clocked in");
        Ok(entry)
    }
}

fn load(
    tables: &Tables,
    tenant_id: TenantId,
    employee_id: EmployeeId,
    today: NaiveDate,
) -> ClockInState {
    ClockInState {
        employee: tables.employee(tenant_id, employee_id).cloned(),
        active_entry: repository::active_entry_for(tables, tenant_id, employee_id).cloned(),
        assignment: scheduling::active_assignment_for(tables, tenant_id, employee_id, today).cloned(),
    }
}

pub(crate) fn entry_of(events: &[TimeEvent]) -> Result<TimeEntry, ApplicationError> {
    events
        .iter()
        .find_map(TimeEvent::entry)
        .cloned()
        .ok_or_else(|| ApplicationError::Unexpected("accepted time change without an entry".into()))
}
