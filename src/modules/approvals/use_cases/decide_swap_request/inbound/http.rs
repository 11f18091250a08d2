use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use uuid::Uuid;

use crate::modules::approvals::core::requests::RequestDecision;
use crate::modules::approvals::use_cases::decide_swap_request::handler::SwapDecisionHandler;
use crate::shared::core::errors::ApplicationError;
use crate::shell::identity::Caller;
use crate::shell::response;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Caller(context): Caller,
    Path(id): Path<Uuid>,
    body: Result<Json<RequestDecision>, JsonRejection>,
) -> Result<Response, ApplicationError> {
    let Json(command) = body?;
    let request = SwapDecisionHandler::new(state.ports.clone())
        .handle(&context, id, command)
        .await?;
    Ok(response::ok(request))
}
