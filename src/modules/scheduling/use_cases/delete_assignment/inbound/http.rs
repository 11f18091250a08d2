use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Response;
use serde_json::json;

use crate::modules::scheduling::use_cases::delete_assignment::command::DeleteAssignment;
use crate::modules::scheduling::use_cases::delete_assignment::handler::DeleteAssignmentHandler;
use crate::shared::core::errors::ApplicationError;
use crate::shell::identity::Caller;
use crate::shell::response;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Caller(context): Caller,
    query: Result<Query<DeleteAssignment>, QueryRejection>,
) -> Result<Response, ApplicationError> {
    let Query(command) = query?;
    let deleted = DeleteAssignmentHandler::new(state.ports.clone())
        .handle(&context, command)
        .await?;
    Ok(response::ok(json!({ "id": deleted.id })))
}
