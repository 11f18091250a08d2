use chrono::Utc;
use uuid::Uuid;

use crate::modules::approvals::adapters::outbound::repository;
use crate::modules::approvals::core::events::ApprovalEvent;
use crate::modules::approvals::core::requests::{LeaveRequest, RequestDecision};
use crate::modules::approvals::use_cases::decide_leave_request::decide::{
    LeaveDecisionState, decide_leave_request,
};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{AccessContext, TenantId};
use crate::shared::infrastructure::database::Tables;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::ports::Ports;

pub struct LeaveDecisionHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    ports: Ports<TOutbox>,
}

impl<TOutbox> LeaveDecisionHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    pub fn new(ports: Ports<TOutbox>) -> Self {
        Self { ports }
    }

    #[tracing::instrument(skip_all, fields(tenant_id = %context.tenant_id, leave_request_id = %id, action = ?command.action))]
    pub async fn handle(
        &self,
        context: &AccessContext,
        id: Uuid,
        command: RequestDecision,
    ) -> Result<LeaveRequest, ApplicationError> {
        let mut transaction = self.ports.database.begin().await?;
        let state = load(transaction.tables(), context.tenant_id, id);
        let (events, intents) =
            decide_leave_request(&state, id, &command, context, Utc::now()).into_result()?;
        repository::apply_all(transaction.tables_mut(), &events)?;
        transaction.commit().await?;

        let (request, cancelled) = events
            .iter()
            .find_map(|event| match event {
                ApprovalEvent::LeaveDecided {
                    request, cancelled, ..
                } => Some((request.clone(), cancelled.len())),
                _ => None,
            })
            .ok_or_else(|| ApplicationError::Unexpected("decision produced no leave request".into()))?;
        self.ports.publish(&request.stream_id(), intents).await;
        tracing::info!(status = request.status.as_str(), cancelled, "leave request decided");
        Ok(request)
    }
}

fn load(tables: &Tables, tenant_id: TenantId, id: Uuid) -> LeaveDecisionState {
    let request = repository::find_leave_request(tables, tenant_id, id);
    LeaveDecisionState {
        employee: request
            .and_then(|request| tables.employee(tenant_id, request.employee_id))
            .cloned(),
        assignments: request
            .map(|request| {
                repository::active_assignments_of(
                    tables,
                    tenant_id,
                    request.employee_id,
                    request.start_date,
                    request.end_date,
                )
            })
            .unwrap_or_default(),
        request: request.cloned(),
        settings: tables.tenant_settings(tenant_id),
    }
}
