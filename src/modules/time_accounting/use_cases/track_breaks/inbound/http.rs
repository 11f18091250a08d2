use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Response;

use crate::modules::time_accounting::use_cases::track_breaks::command::{EndBreak, StartBreak};
use crate::modules::time_accounting::use_cases::track_breaks::handler::BreakHandler;
use crate::shared::core::errors::ApplicationError;
use crate::shell::identity::Caller;
use crate::shell::response;
use crate::shell::state::AppState;

pub async fn start(
    State(state): State<AppState>,
    Caller(context): Caller,
    body: Result<Json<StartBreak>, JsonRejection>,
) -> Result<Response, ApplicationError> {
    let Json(command) = body?;
    let entry = BreakHandler::new(state.ports.clone())
        .start(&context, command)
        .await?;
    Ok(response::ok(entry))
}

pub async fn end(
    State(state): State<AppState>,
    Caller(context): Caller,
    body: Result<Json<EndBreak>, JsonRejection>,
) -> Result<Response, ApplicationError> {
    let Json(command) = body?;
    let entry = BreakHandler::new(state.ports.clone())
        .end(&context, command)
        .await?;
    Ok(response::ok(entry))
}
