use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Response;

use crate::modules::time_accounting::use_cases::clock_in::command::ClockIn;
use crate::modules::time_accounting::use_cases::clock_in::handler::ClockInHandler;
use crate::shared::core::errors::ApplicationError;
use crate::shell::identity::Caller;
use crate::shell::response;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Caller(context): Caller,
    body: Result<Json<ClockIn>, JsonRejection>,
) -> Result<Response, ApplicationError> {
    let Json(command) = body?;
    let entry = ClockInHandler::new(state.ports.clone())
        .handle(&context, command)
        .await?;
    Ok(response::created(entry))
}
