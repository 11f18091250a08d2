use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Response;

use crate::modules::approvals::use_cases::bulk_approve_timesheets::command::BulkApproveTimesheets;
use crate::modules::approvals::use_cases::bulk_approve_timesheets::handler::BulkApproveHandler;
use crate::shared::core::errors::ApplicationError;
use crate::shell::identity::Caller;
use crate::shell::response;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Caller(context): Caller,
    body: Result<Json<BulkApproveTimesheets>, JsonRejection>,
) -> Result<Response, ApplicationError> {
    let Json(command) = body?;
    let outcome = BulkApproveHandler::new(state.ports.clone())
        .handle(&context, command)
        .await?;
    Ok(response::ok(outcome))
}
