use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::Response;
use uuid::Uuid;

use crate::modules::scheduling::use_cases::manage_templates::command::{
    CreateTemplate, DeactivateTemplate, ListTemplates,
};
use crate::modules::scheduling::use_cases::manage_templates::handler::TemplateHandler;
use crate::shared::core::errors::ApplicationError;
use crate::shell::identity::Caller;
use crate::shell::response;
use crate::shell::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    Caller(context): Caller,
    query: Result<Query<ListTemplates>, QueryRejection>,
) -> Result<Response, ApplicationError> {
    let Query(query) = query?;
    let templates = TemplateHandler::new(state.ports.clone())
        .list(&context, query)
        .await?;
    Ok(response::ok(templates))
}

pub async fn create(
    State(state): State<AppState>,
    Caller(context): Caller,
    body: Result<Json<CreateTemplate>, JsonRejection>,
) -> Result<Response, ApplicationError> {
    let Json(command) = body?;
    let template = TemplateHandler::new(state.ports.clone())
        .create(&context, command)
        .await?;
    Ok(response::created(template))
}

pub async fn deactivate(
    State(state): State<AppState>,
    Caller(context): Caller,
    Path(id): Path<Uuid>,
) -> Result<Response, ApplicationError> {
    let template = TemplateHandler::new(state.ports.clone())
        .deactivate(&context, DeactivateTemplate { id })
        .await?;
    Ok(response::ok(template))
}
