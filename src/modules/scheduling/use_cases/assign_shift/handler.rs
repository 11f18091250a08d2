use chrono::Utc;

use crate::modules::scheduling::adapters::outbound::repository;
use crate::modules::scheduling::core::events::SchedulingEvent;
use crate::modules::scheduling::core::shift::ShiftAssignment;
use crate::modules::scheduling::use_cases::assign_shift::command::AssignShift;
use crate::modules::scheduling::use_cases::assign_shift::decide::{AssignState, decide_assign};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{AccessContext, TenantId};
use crate::shared::infrastructure::database::Tables;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::ports::Ports;

pub struct AssignShiftHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    ports: Ports<TOutbox>,
}

impl<TOutbox> AssignShiftHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    pub fn new(ports: Ports<TOutbox>) -> Self {
        Self { ports }
    }

    #[tracing::instrument(
        skip_all,
        fields(tenant_id = %context.tenant_id, employee_id = %command.employee_id, date = %command.date)
    )]
    pub async fn handle(
        &self,
        context: &AccessContext,
        command: AssignShift,
    ) -> Result<ShiftAssignment, ApplicationError> {
        let mut transaction = self.ports.database.begin().await?;
        let state = load(transaction.tables(), context.tenant_id, &command);
        let (events, intents) = decide_assign(&state, command, context, Utc::now()).into_result()?;
        repository::apply_all(transaction.tables_mut(), &events)?;
        transaction.commit().await?;

        let assignment = events
            .iter()
            .find_map(SchedulingEvent::assignment)
            .cloned()
            .ok_or_else(|| ApplicationError::Unexpected("accepted assignment without a row".into()))?;
        self.ports.publish(&assignment.stream_id(), intents).await;
        tracing::info!(assignment_id = %assignment.id, "shift assigned");
        Ok(assignment)
    }
}

fn load(tables: &Tables, tenant_id: TenantId, command: &AssignShift) -> AssignState {
    AssignState {
        employee: tables.employee(tenant_id, command.employee_id).cloned(),
        template: command
            .shape
            .template_id
            .and_then(|id| repository::find_template(tables, tenant_id, id))
            .cloned(),
        rota: command
            .rota_id
            .and_then(|id| repository::find_rota(tables, tenant_id, id))
            .cloned(),
        existing: repository::active_assignment_for(
            tables,
            tenant_id,
            command.employee_id,
            command.date,
        )
        .cloned(),
    }
}
