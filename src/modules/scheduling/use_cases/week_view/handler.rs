use chrono::NaiveDate;

use crate::modules::scheduling::use_cases::week_view::projection::{WeekView, project_week};
use crate::modules::scheduling::use_cases::week_view::query::WeekViewQuery;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::AccessContext;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::ports::Ports;

pub struct WeekViewHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    ports: Ports<TOutbox>,
}

impl<TOutbox> WeekViewHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    pub fn new(ports: Ports<TOutbox>) -> Self {
        Self { ports }
    }

    #[tracing::instrument(skip_all, fields(tenant_id = %context.tenant_id, %anchor))]
    pub async fn handle(
        &self,
        context: &AccessContext,
        anchor: NaiveDate,
        query: WeekViewQuery,
    ) -> Result<WeekView, ApplicationError> {
        let view = self
            .ports
            .database
            .read(|tables| project_week(tables, context, anchor, &query))
            .await??;
        tracing::debug!(employees = view.employees.len(), "week view projected");
        Ok(view)
    }
}
