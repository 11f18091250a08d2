use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Response;

use crate::modules::time_accounting::use_cases::clock_out::command::ClockOut;
use crate::modules::time_accounting::use_cases::clock_out::handler::ClockOutHandler;
use crate::shared::core::errors::ApplicationError;
use crate::shell::identity::Caller;
use crate::shell::response;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Caller(context): Caller,
    body: Result<Json<ClockOut>, JsonRejection>,
) -> Result<Response, ApplicationError> {
    let Json(command) = body?;
    let entry = ClockOutHandler::new(state.ports.clone())
        .handle(&context, command)
        .await?;
    Ok(response::ok(entry))
}
