use chrono::Utc;

use crate::modules::approvals::adapters::outbound::repository;
use crate::modules::approvals::core::events::ApprovalEvent;
use crate::modules::approvals::core::requests::ShiftSwapRequest;
use crate::modules::approvals::use_cases::submit_swap_request::command::SubmitSwapRequest;
use crate::modules::approvals::use_cases::submit_swap_request::decide::{
    SubmitSwapState, decide_submit_swap,
};
use crate::modules::scheduling::adapters::outbound::repository::find_assignment;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::AccessContext;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::ports::Ports;

pub struct SubmitSwapHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    ports: Ports<TOutbox>,
}

impl<TOutbox> SubmitSwapHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    pub fn new(ports: Ports<TOutbox>) -> Self {
        Self { ports }
    }

    #[tracing::instrument(skip_all, fields(tenant_id = %context.tenant_id, target_id = %command.target_id))]
    pub async fn handle(
        &self,
        context: &AccessContext,
        command: SubmitSwapRequest,
    ) -> Result<ShiftSwapRequest, ApplicationError> {
        let tenant_id = context.tenant_id;
        let mut transaction = self.ports.database.begin().await?;
        let tables = transaction.tables();
        let state = SubmitSwapState {
            requester: tables.employee(tenant_id, context.user_id).cloned(),
            target: tables.employee(tenant_id, command.target_id).cloned(),
            original: find_assignment(tables, tenant_id, command.original_shift_id).cloned(),
            requested: find_assignment(tables, tenant_id, command.requested_shift_id).cloned(),
        };
        let (events, intents) =
            decide_submit_swap(&state, &command, context, Utc::now()).into_result()?;
        repository::apply_all(transaction.tables_mut(), &events)?;
        transaction.commit().await?;

        let request = events
            .iter()
            .find_map(|event| match event {
                ApprovalEvent::SwapRequested(request) => Some(request),
                _ => None,
            })
            .cloned()
            .ok_or_else(|| ApplicationError::Unexpected("submission produced no swap request".into()))?;
        self.ports.publish(&request.stream_id(), intents).await;
        tracing::info!(swap_request_id = %request.id, "swap requested");
        Ok(request)
    }
}
