use chrono::Utc;

use crate::modules::discrepancies::use_cases::daily_report::projection::{DailyReport, project_day};
use crate::modules::discrepancies::use_cases::daily_report::query::DailyReportQuery;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::AccessContext;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::ports::Ports;

pub struct DailyReportHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    ports: Ports<TOutbox>,
}

impl<TOutbox> DailyReportHandler<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    pub fn new(ports: Ports<TOutbox>) -> Self {
        Self { ports }
    }

    #[tracing::instrument(skip_all, fields(tenant_id = %context.tenant_id, date = %query.date))]
    pub async fn handle(
        &self,
        context: &AccessContext,
        query: DailyReportQuery,
    ) -> Result<DailyReport, ApplicationError> {
        let report = self
            .ports
            .database
            .read(|tables| project_day(tables, context, query.date, Utc::now()))
            .await??;
        tracing::debug!(
            checked = report.shifts_checked,
            flagged = report.flagged.len(),
            "daily discrepancy report"
        );
        Ok(report)
    }
}
