use chrono::Utc;
use serde::Serialize;

use crate::modules::scheduling::adapters::outbound::repository;
use crate::modules::scheduling::core::events::SchedulingEvent;
use crate::modules::scheduling::core::shift::ShiftAssignment;
use crate::modules::scheduling::use_cases::update_assignment::command::UpdateAssignment;
use crate::modules::scheduling::use_cases::update_assignment::decide::{UpdateState, decide_update};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{AccessContext, TenantId};
use crate::shared::infrastructure::database::Tables;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::ports::Ports;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    pub assignment: ShiftAssignment,
    pub notification_sent: bool,
}

pub struct UpdateAssignmentHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    ports: Ports<TOutbox>,
}

impl<TOutbox> UpdateAssignmentHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    pub fn new(ports: Ports<TOutbox>) -> Self {
        Self { ports }
    }

    #[tracing::instrument(
        skip_all,
        fields(tenant_id = %context.tenant_id, assignment_id = %command.id, emergency = command.emergency_mode)
    )]
    pub async fn handle(
        &self,
        context: &AccessContext,
        command: UpdateAssignment,
    ) -> Result<UpdateOutcome, ApplicationError> {
        let mut transaction = self.ports.database.begin().await?;
        let state = load(transaction.tables(), context.tenant_id, &command);
        let (events, intents) = decide_update(&state, command, context, Utc::now()).into_result()?;
        repository::apply_all(transaction.tables_mut(), &events)?;
        transaction.commit().await?;

        let assignment = events
            .iter()
            .find_map(SchedulingEvent::assignment)
            .cloned()
            .ok_or_else(|| ApplicationError::Unexpected("accepted update without a row".into()))?;
        let notification_sent = self.ports.publish(&assignment.stream_id(), intents).await;
        tracing::info!(notification_sent, "assignment updated");
        Ok(UpdateOutcome {
            assignment,
            notification_sent,
        })
    }
}

fn load(tables: &Tables, tenant_id: TenantId, command: &UpdateAssignment) -> UpdateState {
    let Some(assignment) = repository::find_assignment(tables, tenant_id, command.id) else {
        return UpdateState::default();
    };
    let employee_id = command.employee_id.unwrap_or(assignment.employee_id);
    let date = command.date.unwrap_or(assignment.date);
    UpdateState {
        owner: tables.employee(tenant_id, assignment.employee_id).cloned(),
        assignee: tables.employee(tenant_id, employee_id).cloned(),
        template: command
            .shape
            .template_id
            .and_then(|id| repository::find_template(tables, tenant_id, id))
            .cloned(),
        clash: repository::active_assignment_for(tables, tenant_id, employee_id, date)
            .filter(|other| other.id != assignment.id)
            .cloned(),
        assignment: Some(assignment.clone()),
    }
}
