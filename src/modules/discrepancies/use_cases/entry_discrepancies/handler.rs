use uuid::Uuid;

use crate::modules::discrepancies::use_cases::entry_discrepancies::projection::{
    EntryDiscrepancies, project_entry,
};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::AccessContext;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::ports::Ports;

pub struct EntryDiscrepanciesHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    ports: Ports<TOutbox>,
}

impl<TOutbox> EntryDiscrepanciesHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    pub fn new(ports: Ports<TOutbox>) -> Self {
        Self { ports }
    }

    #[tracing::instrument(skip_all, fields(tenant_id = %context.tenant_id, %entry_id))]
    pub async fn handle(
        &self,
        context: &AccessContext,
        entry_id: Uuid,
    ) -> Result<EntryDiscrepancies, ApplicationError> {
        self.ports
            .database
            .read(|tables| project_entry(tables, context, entry_id))
            .await?
    }
}
