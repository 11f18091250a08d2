use chrono::Utc;
use uuid::Uuid;

use crate::modules::approvals::adapters::outbound::repository;
use crate::modules::approvals::core::events::ApprovalEvent;
use crate::modules::approvals::use_cases::decide_timesheet::command::DecideTimesheet;
use crate::modules::approvals::use_cases::decide_timesheet::decide::{
    TimesheetState, decide_timesheet,
};
use crate::modules::time_accounting::adapters::outbound::repository as time_entries;
use crate::modules::time_accounting::core::time_entry::TimeEntry;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{AccessContext, TenantId};
use crate::shared::infrastructure::database::Tables;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::ports::Ports;

pub struct TimesheetDecisionHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    ports: Ports<TOutbox>,
}

impl<TOutbox> TimesheetDecisionHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    pub fn new(ports: Ports<TOutbox>) -> Self {
        Self { ports }
    }

    #[tracing::instrument(skip_all, fields(tenant_id = %context.tenant_id, entry_id = %command.id, action = ?command.action))]
    pub async fn handle(
        &self,
        context: &AccessContext,
        command: DecideTimesheet,
    ) -> Result<TimeEntry, ApplicationError> {
        let mut transaction = self.ports.database.begin().await?;
        let state = load_timesheet(transaction.tables(), context.tenant_id, command.id);
        let (events, intents) =
            decide_timesheet(&state, &command, context, Utc::now()).into_result()?;
        repository::apply_all(transaction.tables_mut(), &events)?;
        transaction.commit().await?;

        let entry = decided_entry(&events)?;
        self.ports.publish(&entry.stream_id(), intents).await;
        tracing::info!(
            status = entry.approval_status.as_str(),
            total_pay = ?entry.total_pay,
            "timesheet decided"
        );
        Ok(entry)
    }
}

pub(crate) fn load_timesheet(tables: &Tables, tenant_id: TenantId, id: Uuid) -> TimesheetState {
    let entry = time_entries::find_entry(tables, tenant_id, id);
    TimesheetState {
        employee: entry
            .and_then(|entry| tables.employee(tenant_id, entry.employee_id))
            .cloned(),
        entry: entry.cloned(),
        settings: tables.tenant_settings(tenant_id),
    }
}

fn decided_entry(events: &[ApprovalEvent]) -> Result<TimeEntry, ApplicationError> {
    events
        .iter()
        .find_map(|event| match event {
            ApprovalEvent::TimesheetDecided { entry, .. } => Some(entry),
            _ => None,
        })
        .cloned()
        .ok_or_else(|| ApplicationError::Unexpected("decision produced no time entry".into()))
}

#[cfg(test)]
mod decide_timesheet_handler_tests {
    use super::*;
    use crate::modules::approvals::core::requests::ApprovalEntity;
    use crate::modules::approvals::core::state::{ApprovalStatus, Verdict};
    use crate::shared::core::notifications::NotificationKind;
    use crate::tests::fixtures::time::{TimeEntryBuilder, june_10};
    use crate::tests::fixtures::world::{TestWorld, world};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    async fn seed_completed(world: &TestWorld) -> Uuid {
        let entry = TimeEntryBuilder::new()
            .tenant_id(world.tenant_id)
            .employee_id(world.alice.id)
            .completed(june_10(17, 0))
            .build();
        let id = entry.id;
        world
            .seed(move |tables| {
                tables.time_entries.insert(entry.id, entry);
            })
            .await;
        id
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_approve_write_history_and_notify(world: TestWorld) {
        let id = seed_completed(&world).await;

        let entry = TimesheetDecisionHandler::new(world.ports())
            .handle(&world.admin_ctx(), DecideTimesheet::approve(id, Some("ok".into())))
            .await
            .expect("approval failed");

        assert_eq!(entry.approval_status, ApprovalStatus::Approved);
        assert_eq!(entry.total_pay, Some(dec!(120.00)));
        let history = world.read(|tables| tables.approval_history.clone()).await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].entity_type, ApprovalEntity::Timesheet);
        assert_eq!(history[0].notes.as_deref(), Some("ok"));
        let intents = world.intents().await;
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].recipient_id, world.alice.id);
        assert_eq!(intents[0].kind, NotificationKind::Timesheet);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_refuse_deciding_twice(world: TestWorld) {
        let id = seed_completed(&world).await;
        let handler = TimesheetDecisionHandler::new(world.ports());
        handler
            .handle(&world.admin_ctx(), DecideTimesheet::approve(id, None))
            .await
            .unwrap();

        let again = handler
            .handle(
                &world.admin_ctx(),
                DecideTimesheet {
                    action: Verdict::Reject,
                    rejection_reason: Some("late".into()),
                    ..DecideTimesheet::approve(id, None)
                },
            )
            .await;
        assert!(matches!(again, Err(ApplicationError::InvalidState(_))));
        assert_eq!(world.read(|tables| tables.approval_history.len()).await, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_forbid_managers_by_default(world: TestWorld) {
        let id = seed_completed(&world).await;
        let result = TimesheetDecisionHandler::new(world.ports())
            .handle(&world.manager_ctx(), DecideTimesheet::approve(id, None))
            .await;
        assert!(matches!(result, Err(ApplicationError::Forbidden(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_let_managers_decide_when_the_tenant_allows_it() {
        let world = TestWorld::with_manager_approvals();
        let id = seed_completed(&world).await;
        let entry = TimesheetDecisionHandler::new(world.ports())
            .handle(&world.manager_ctx(), DecideTimesheet::approve(id, None))
            .await
            .unwrap();
        assert_eq!(entry.approved_by, Some(world.manager.id));
    }
}
