use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};
use uuid::Uuid;

use crate::modules::discrepancies::core::detector::{Discrepancy, Severity};
use crate::modules::discrepancies::use_cases::entry_discrepancies::handler::EntryDiscrepanciesHandler;
use crate::shared::core::primitives::AccessContext;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlDiscrepancy {
    pub kind: String,
    pub severity: String,
    pub message: String,
    pub minutes: Option<i64>,
}

impl From<Discrepancy> for GqlDiscrepancy {
    fn from(v: Discrepancy) -> Self {
        Self {
            kind: v.kind.as_str().to_string(),
            severity: match v.severity {
                Severity::Warning => "warning".into(),
                Severity::Error => "error".into(),
            },
            message: v.message,
            minutes: v.minutes,
        }
    }
}

#[derive(Default)]
pub struct DiscrepancyQueryRoot;

#[Object]
impl DiscrepancyQueryRoot {
    async fn entry_discrepancies(
        &self,
        context: &Context<'_>,
        entry_id: Uuid,
    ) -> GqlResult<Vec<GqlDiscrepancy>> {
        let state = context.data_unchecked::<AppState>();
        let caller = context.data::<AccessContext>()?;
        let found = EntryDiscrepanciesHandler::new(state.ports.clone())
            .handle(caller, entry_id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(found.discrepancies.into_iter().map(Into::into).collect())
    }
}
