use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use uuid::Uuid;

use crate::modules::time_accounting::use_cases::edit_time_entry::command::EditTimeEntry;
use crate::modules::time_accounting::use_cases::edit_time_entry::handler::EditTimeEntryHandler;
use crate::shared::core::errors::ApplicationError;
use crate::shell::identity::Caller;
use crate::shell::response;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Caller(context): Caller,
    Path(id): Path<Uuid>,
    body: Result<Json<EditTimeEntry>, JsonRejection>,
) -> Result<Response, ApplicationError> {
    let Json(command) = body?;
    let entry = EditTimeEntryHandler::new(state.ports.clone())
        .handle(&context, EditTimeEntry { id, ..command })
        .await?;
    Ok(response::ok(entry))
}

#[cfg(test)]
mod edit_time_entry_http_inbound_tests {
    use axum::http::{Method, StatusCode};
    use rstest::rstest;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::tests::fixtures::http::{read_json, request};
    use crate::tests::fixtures::time::{TimeEntryBuilder, june_10};
    use crate::tests::fixtures::world::{TestWorld, world};

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_clock_out_before_clock_in(world: TestWorld) {
        let entry = TimeEntryBuilder::new()
            .tenant_id(world.tenant_id)
            .employee_id(world.alice.id)
            .completed(june_10(17, 0))
            .build();
        let uri = format!("/time/entries/{}", entry.id);
        world
            .seed(move |tables| {
                tables.time_entries.insert(entry.id, entry);
            })
            .await;

        let response = world
            .app()
            .oneshot(request(
                Method::PATCH,
                &uri,
                &world.admin_ctx(),
                Some(json!({ "clock_out": "2024-06-10T08:00:00Z" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = read_json(response).await;
        assert_eq!(json["details"][0]["path"], "clock_out");
    }
}
