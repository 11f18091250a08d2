use chrono::Utc;

use crate::modules::approvals::adapters::outbound::repository;
use crate::modules::approvals::core::events::ApprovalEvent;
use crate::modules::approvals::core::requests::LeaveRequest;
use crate::modules::approvals::use_cases::submit_leave_request::command::SubmitLeaveRequest;
use crate::modules::approvals::use_cases::submit_leave_request::decide::{
    SubmitLeaveState, decide_submit_leave,
};
use crate::modules::time_accounting::adapters::outbound::repository::tenant_admins;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::AccessContext;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::ports::Ports;

pub struct SubmitLeaveHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    ports: Ports<TOutbox>,
}

impl<TOutbox> SubmitLeaveHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    pub fn new(ports: Ports<TOutbox>) -> Self {
        Self { ports }
    }

    #[tracing::instrument(skip_all, fields(tenant_id = %context.tenant_id))]
    pub async fn handle(
        &self,
        context: &AccessContext,
        command: SubmitLeaveRequest,
    ) -> Result<LeaveRequest, ApplicationError> {
        let employee_id = command.employee_for(context);
        let mut transaction = self.ports.database.begin().await?;
        let tables = transaction.tables();
        let state = SubmitLeaveState {
            employee: tables.employee(context.tenant_id, employee_id).cloned(),
            overlapping: repository::leave_overlapping(
                tables,
                context.tenant_id,
                employee_id,
                command.start_date,
                command.end_date,
            ),
            admins: tenant_admins(tables, context.tenant_id),
        };
        let (events, intents) =
            decide_submit_leave(&state, &command, employee_id, context, Utc::now()).into_result()?;
        repository::apply_all(transaction.tables_mut(), &events)?;
        transaction.commit().await?;

        let request = events
            .iter()
            .find_map(|event| match event {
                ApprovalEvent::LeaveRequested(request) => Some(request),
                _ => None,
            })
            .cloned()
            .ok_or_else(|| ApplicationError::Unexpected("submission produced no leave request".into()))?;
        self.ports.publish(&request.stream_id(), intents).await;
        tracing::info!(leave_request_id = %request.id, days = request.days_requested, "leave requested");
        Ok(request)
    }
}
