use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Response;

use crate::modules::scheduling::use_cases::assign_shift::command::AssignShift;
use crate::modules::scheduling::use_cases::assign_shift::handler::AssignShiftHandler;
use crate::shared::core::errors::ApplicationError;
use crate::shell::identity::Caller;
use crate::shell::response;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Caller(context): Caller,
    body: Result<Json<AssignShift>, JsonRejection>,
) -> Result<Response, ApplicationError> {
    let Json(command) = body?;
    let assignment = AssignShiftHandler::new(state.ports.clone())
        .handle(&context, command)
        .await?;
    Ok(response::created(assignment))
}
