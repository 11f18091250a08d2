use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use chrono::NaiveDate;

use crate::modules::scheduling::use_cases::week_view::handler::WeekViewHandler;
use crate::modules::scheduling::use_cases::week_view::query::WeekViewQuery;
use crate::shared::core::errors::ApplicationError;
use crate::shell::identity::Caller;
use crate::shell::response;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Caller(context): Caller,
    Path(date): Path<String>,
    query: Result<Query<WeekViewQuery>, QueryRejection>,
) -> Result<Response, ApplicationError> {
    let anchor = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| ApplicationError::validation("date", "expected YYYY-MM-DD"))?;
    let Query(query) = query?;
    let view = WeekViewHandler::new(state.ports.clone())
        .handle(&context, anchor, query)
        .await?;
    Ok(response::ok(view))
}
