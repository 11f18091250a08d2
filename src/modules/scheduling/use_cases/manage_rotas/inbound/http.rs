use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use uuid::Uuid;

use crate::modules::scheduling::use_cases::manage_rotas::command::{
    CreateRota, PublishRota, RevertRota,
};
use crate::modules::scheduling::use_cases::manage_rotas::handler::RotaHandler;
use crate::shared::core::errors::ApplicationError;
use crate::shell::identity::Caller;
use crate::shell::response;
use crate::shell::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    Caller(context): Caller,
    body: Result<Json<CreateRota>, JsonRejection>,
) -> Result<Response, ApplicationError> {
    let Json(command) = body?;
    let rota = RotaHandler::new(state.ports.clone())
        .create(&context, command)
        .await?;
    Ok(response::created(rota))
}

pub async fn publish(
    State(state): State<AppState>,
    Caller(context): Caller,
    Path(id): Path<Uuid>,
) -> Result<Response, ApplicationError> {
    let publication = RotaHandler::new(state.ports.clone())
        .publish(&context, PublishRota { id })
        .await?;
    Ok(response::ok(publication))
}

pub async fn revert(
    State(state): State<AppState>,
    Caller(context): Caller,
    Path(id): Path<Uuid>,
) -> Result<Response, ApplicationError> {
    let rota = RotaHandler::new(state.ports.clone())
        .revert(&context, RevertRota { id })
        .await?;
    Ok(response::ok(rota))
}
