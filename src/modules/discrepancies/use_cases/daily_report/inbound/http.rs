use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Response;

use crate::modules::discrepancies::use_cases::daily_report::handler::DailyReportHandler;
use crate::modules::discrepancies::use_cases::daily_report::query::DailyReportQuery;
use crate::shared::core::errors::ApplicationError;
use crate::shell::identity::Caller;
use crate::shell::response;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Caller(context): Caller,
    query: Result<Query<DailyReportQuery>, QueryRejection>,
) -> Result<Response, ApplicationError> {
    let Query(query) = query?;
    let report = DailyReportHandler::new(state.ports.clone())
        .handle(&context, query)
        .await?;
    Ok(response::ok(report))
}
