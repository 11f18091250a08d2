// Approves many timesheets in one transaction. Each entry is decided on its
// own against the working tables; an entry that cannot be approved is logged
// and skipped without failing the batch.

use chrono::Utc;

use crate::modules::approvals::adapters::outbound::repository;
use crate::modules::approvals::use_cases::bulk_approve_timesheets::command::{
    BulkApproval, BulkApproveTimesheets,
};
use crate::modules::approvals::use_cases::decide_timesheet::command::DecideTimesheet;
use crate::modules::approvals::use_cases::decide_timesheet::decide::decide_timesheet;
use crate::modules::approvals::use_cases::decide_timesheet::handler::load_timesheet;
use crate::shared::core::access::ensure_can_manage_tenant;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::AccessContext;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::ports::Ports;

pub struct BulkApproveHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    ports: Ports<TOutbox>,
}

impl<TOutbox> BulkApproveHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    pub fn new(ports: Ports<TOutbox>) -> Self {
        Self { ports }
    }

    #[tracing::instrument(skip_all, fields(tenant_id = %context.tenant_id, requested = command.entry_ids.len()))]
    pub async fn handle(
        &self,
        context: &AccessContext,
        command: BulkApproveTimesheets,
    ) -> Result<BulkApproval, ApplicationError> {
        ensure_can_manage_tenant(context)?;
        let now = Utc::now();
        let mut transaction = self.ports.database.begin().await?;
        let mut notifications = Vec::new();

        for id in &command.entry_ids {
            let state = load_timesheet(transaction.tables(), context.tenant_id, *id);
            let approval = DecideTimesheet::approve(*id, command.notes.clone());
            let decided = decide_timesheet(&state, &approval, context, now)
                .into_result()
                .map_err(ApplicationError::from)
                .and_then(|(events, intents)| {
                    repository::apply_all(transaction.tables_mut(), &events)?;
                    Ok(intents)
                });
            match decided {
                Ok(intents) => notifications.push((*id, intents)),
                Err(error) => tracing::warn!(entry_id = %id, %error, "skipping timesheet"),
            }
        }
        transaction.commit().await?;

        let approved_count = notifications.len();
        for (id, intents) in notifications {
            self.ports.publish(&format!("TimeEntry-{id}"), intents).await;
        }
        tracing::info!(approved_count, "bulk approval finished");
        Ok(BulkApproval {
            approved_count,
            total_requested: command.entry_ids.len(),
        })
    }
}
