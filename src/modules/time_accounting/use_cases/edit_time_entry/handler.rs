use crate::modules::time_accounting::adapters::outbound::repository;
use crate::modules::time_accounting::core::time_entry::TimeEntry;
use crate::modules::time_accounting::use_cases::clock_in::handler::entry_of;
use crate::modules::time_accounting::use_cases::edit_time_entry::command::EditTimeEntry;
use crate::modules::time_accounting::use_cases::edit_time_entry::decide::{EditState, decide_edit};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::AccessContext;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::ports::Ports;

pub struct EditTimeEntryHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    ports: Ports<TOutbox>,
}

impl<TOutbox> EditTimeEntryHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    pub fn new(ports: Ports<TOutbox>) -> Self {
        Self { ports }
    }

    #[tracing::instrument(skip_all, fields(tenant_id = %context.tenant_id, entry_id = %command.id))]
    pub async fn handle(
        &self,
        context: &AccessContext,
        command: EditTimeEntry,
    ) -> Result<TimeEntry, ApplicationError> {
        let mut transaction = self.ports.database.begin().await?;
        let tables = transaction.tables();
        let entry = repository::find_entry(tables, context.tenant_id, command.id);
        let state = EditState {
            employee: entry
                .and_then(|entry| tables.employee(context.tenant_id, entry.employee_id))
                .cloned(),
            entry: entry.cloned(),
        };
        let (events, _) = decide_edit(&state, command, context).into_result()?;
        repository::apply_all(transaction.tables_mut(), &events)?;
        transaction.commit().await?;
        tracing::info!("time entry edited");
        entry_of(&events)
    }
}
