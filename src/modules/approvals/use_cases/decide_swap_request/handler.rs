use chrono::Utc;
use uuid::Uuid;

use crate::modules::approvals::adapters::outbound::repository;
use crate::modules::approvals::core::events::ApprovalEvent;
use crate::modules::approvals::core::requests::{RequestDecision, ShiftSwapRequest};
use crate::modules::approvals::use_cases::decide_swap_request::decide::{
    SwapDecisionState, decide_swap_request,
};
use crate::modules::scheduling::adapters::outbound::repository as scheduling;
use crate::modules::scheduling::core::shift::ShiftAssignment;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{AccessContext, EmployeeId, TenantId};
use crate::shared::infrastructure::database::Tables;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::ports::Ports;

pub struct SwapDecisionHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    ports: Ports<TOutbox>,
}

impl<TOutbox> SwapDecisionHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    pub fn new(ports: Ports<TOutbox>) -> Self {
        Self { ports }
    }

    #[tracing::instrument(skip_all, fields(tenant_id = %context.tenant_id, swap_request_id = %id, action = ?command.action))]
    pub async fn handle(
        &self,
        context: &AccessContext,
        id: Uuid,
        command: RequestDecision,
    ) -> Result<ShiftSwapRequest, ApplicationError> {
        let mut transaction = self.ports.database.begin().await?;
        let state = load(transaction.tables(), context.tenant_id, id);
        let (events, intents) =
            decide_swap_request(&state, id, &command, context, Utc::now()).into_result()?;
        repository::apply_all(transaction.tables_mut(), &events)?;
        transaction.commit().await?;

        let request = events
            .iter()
            .find_map(|event| match event {
                ApprovalEvent::SwapDecided { request, .. } => Some(request),
                _ => None,
            })
            .cloned()
            .ok_or_else(|| ApplicationError::Unexpected("decision produced no swap request".into()))?;
        self.ports.publish(&request.stream_id(), intents).await;
        tracing::info!(status = request.status.as_str(), "swap request decided");
        Ok(request)
    }
}

fn load(tables: &Tables, tenant_id: TenantId, id: Uuid) -> SwapDecisionState {
    let request = repository::find_swap_request(tables, tenant_id, id);
    let original = request
        .and_then(|request| scheduling::find_assignment(tables, tenant_id, request.original_shift_id));
    let requested = request
        .and_then(|request| scheduling::find_assignment(tables, tenant_id, request.requested_shift_id));
    SwapDecisionState {
        requester: request
            .and_then(|request| tables.employee(tenant_id, request.requester_id))
            .cloned(),
        target: request
            .and_then(|request| tables.employee(tenant_id, request.target_id))
            .cloned(),
        settings: tables.tenant_settings(tenant_id),
        requester_clash: request.and_then(|request| {
            clash(tables, request.requester_id, requested, original)
        }),
        target_clash: request.and_then(|request| {
            clash(tables, request.target_id, original, requested)
        }),
        original: original.cloned(),
        requested: requested.cloned(),
        request: request.cloned(),
    }
}

/// A live shift of `employee_id` on the date of `incoming`, other than the one
/// they give away.
fn clash(
    tables: &Tables,
    employee_id: EmployeeId,
    incoming: Option<&ShiftAssignment>,
    outgoing: Option<&ShiftAssignment>,
) -> Option<ShiftAssignment> {
    let (incoming, outgoing) = (incoming?, outgoing?);
    repository::other_active_assignment(
        tables,
        incoming.tenant_id,
        employee_id,
        incoming.date,
        outgoing.id,
    )
    .cloned()
}
