use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Response;

use crate::modules::scheduling::use_cases::publish_shifts::command::{PublishShifts, PublishShiftsBody};
use crate::modules::scheduling::use_cases::publish_shifts::handler::PublishShiftsHandler;
use crate::shared::core::errors::ApplicationError;
use crate::shell::identity::Caller;
use crate::shell::response;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Caller(context): Caller,
    body: Result<Json<PublishShiftsBody>, JsonRejection>,
) -> Result<Response, ApplicationError> {
    let Json(body) = body?;
    let command = PublishShifts::try_from(body)?;
    let outcome = PublishShiftsHandler::new(state.ports.clone())
        .handle(&context, command)
        .await?;
    Ok(response::ok(outcome))
}
