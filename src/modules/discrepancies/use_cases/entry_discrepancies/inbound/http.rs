use axum::extract::{Path, State};
use axum::response::Response;
use uuid::Uuid;

use crate::modules::discrepancies::use_cases::entry_discrepancies::handler::EntryDiscrepanciesHandler;
use crate::shared::core::errors::ApplicationError;
use crate::shell::identity::Caller;
use crate::shell::response;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Caller(context): Caller,
    Path(id): Path<Uuid>,
) -> Result<Response, ApplicationError> {
    let found = EntryDiscrepanciesHandler::new(state.ports.clone())
        .handle(&context, id)
        .await?;
    Ok(response::ok(found))
}
