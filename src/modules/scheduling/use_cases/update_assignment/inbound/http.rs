use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Response;

use crate::modules::scheduling::use_cases::update_assignment::command::UpdateAssignment;
use crate::modules::scheduling::use_cases::update_assignment::handler::UpdateAssignmentHandler;
use crate::shared::core::errors::ApplicationError;
use crate::shell::identity::Caller;
use crate::shell::response;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Caller(context): Caller,
    body: Result<Json<UpdateAssignment>, JsonRejection>,
) -> Result<Response, ApplicationError> {
    let Json(command) = body?;
    let outcome = UpdateAssignmentHandler::new(state.ports.clone())
        .handle(&context, command)
        .await?;
    Ok(response::ok(outcome))
}
