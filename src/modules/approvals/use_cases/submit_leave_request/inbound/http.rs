use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Response;

use crate::modules::approvals::use_cases::submit_leave_request::command::SubmitLeaveRequest;
use crate::modules::approvals::use_cases::submit_leave_request::handler::SubmitLeaveHandler;
use crate::shared::core::errors::ApplicationError;
use crate::shell::identity::Caller;
use crate::shell::response;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Caller(context): Caller,
    body: Result<Json<SubmitLeaveRequest>, JsonRejection>,
) -> Result<Response, ApplicationError> {
    let Json(command) = body?;
    let request = SubmitLeaveHandler::new(state.ports.clone())
        .handle(&context, command)
        .await?;
    Ok(response::created(request))
}
