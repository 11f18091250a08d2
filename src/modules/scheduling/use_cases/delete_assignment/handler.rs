use crate::modules::scheduling::adapters::outbound::repository;
use crate::modules::scheduling::core::events::SchedulingEvent;
use crate::modules::scheduling::core::shift::ShiftAssignment;
use crate::modules::scheduling::use_cases::delete_assignment::command::DeleteAssignment;
use crate::modules::scheduling::use_cases::delete_assignment::decide::{DeleteState, decide_delete};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{AccessContext, TenantId};
use crate::shared::infrastructure::database::Tables;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::ports::Ports;

pub struct DeleteAssignmentHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    ports: Ports<TOutbox>,
}

impl<TOutbox> DeleteAssignmentHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    pub fn new(ports: Ports<TOutbox>) -> Self {
        Self { ports }
    }

    #[tracing::instrument(skip_all, fields(tenant_id = %context.tenant_id, assignment_id = %command.id))]
    pub async fn handle(
        &self,
        context: &AccessContext,
        command: DeleteAssignment,
    ) -> Result<ShiftAssignment, ApplicationError> {
        let mut transaction = self.ports.database.begin().await?;
        let state = load(transaction.tables(), context.tenant_id, command);
        let (events, intents) = decide_delete(&state, command, context).into_result()?;
        repository::apply_all(transaction.tables_mut(), &events)?;
        transaction.commit().await?;

        let deleted = events
            .iter()
            .find_map(SchedulingEvent::assignment)
            .cloned()
            .ok_or_else(|| ApplicationError::Unexpected("accepted delete without a row".into()))?;
        self.ports.publish(&deleted.stream_id(), intents).await;
        tracing::info!("assignment deleted");
        Ok(deleted)
    }
}

fn load(tables: &Tables, tenant_id: TenantId, command: DeleteAssignment) -> DeleteState {
    let assignment = repository::find_assignment(tables, tenant_id, command.id);
    DeleteState {
        employee: assignment
            .and_then(|assignment| tables.employee(tenant_id, assignment.employee_id))
            .cloned(),
        rota: assignment
            .and_then(|assignment| assignment.rota_id)
            .and_then(|id| repository::find_rota(tables, tenant_id, id))
            .cloned(),
        assignment: assignment.cloned(),
    }
}
