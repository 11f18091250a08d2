use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use uuid::Uuid;

use crate::modules::approvals::use_cases::decide_timesheet::command::DecideTimesheet;
use crate::modules::approvals::use_cases::decide_timesheet::handler::TimesheetDecisionHandler;
use crate::shared::core::errors::ApplicationError;
use crate::shell::identity::Caller;
use crate::shell::response;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Caller(context): Caller,
    Path(id): Path<Uuid>,
    body: Result<Json<DecideTimesheet>, JsonRejection>,
) -> Result<Response, ApplicationError> {
    let Json(command) = body?;
    let entry = TimesheetDecisionHandler::new(state.ports.clone())
        .handle(&context, DecideTimesheet { id, ..command })
        .await?;
    Ok(response::ok(entry))
}

#[cfg(test)]
mod decide_timesheet_http_inbound_tests {
    use axum::http::{Method, StatusCode};
    use rstest::rstest;
    use serde_json::json;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::tests::fixtures::http::{read_json, request};
    use crate::tests::fixtures::time::{TimeEntryBuilder, june_10};
    use crate::tests::fixtures::world::{TestWorld, world};

    async fn seed_completed(world: &TestWorld) -> Uuid {
        let entry = TimeEntryBuilder::new()
            .tenant_id(world.tenant_id)
            .employee_id(world.bob.id)
            .completed(june_10(17, 0))
            .build();
        let id = entry.id;
        world
            .seed(move |tables| {
                tables.time_entries.insert(entry.id, entry);
            })
            .await;
        id
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_without_a_reason_as_a_validation_error(world: TestWorld) {
        let id = seed_completed(&world).await;
        let response = world
            .app()
            .oneshot(request(
                Method::PATCH,
                &format!("/admin/shift-approvals/{id}"),
                &world.admin_ctx(),
                Some(json!({ "action": "reject" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = read_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["details"][0]["path"], "rejection_reason");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_the_priced_entry(world: TestWorld) {
        let id = seed_completed(&world).await;
        let response = world
            .app()
            .oneshot(request(
                Method::PATCH,
                &format!("/admin/shift-approvals/{id}"),
                &world.admin_ctx(),
                Some(json!({ "action": "approve", "approved_rate": 10 })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["data"]["approval_status"], "approved");
        assert_eq!(json["data"]["total_pay"], 80.0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_report_unknown_entries_as_404(world: TestWorld) {
        let response = world
            .app()
            .oneshot(request(
                Method::PATCH,
                &format!("/admin/shift-approvals/{}", Uuid::now_v7()),
                &world.admin_ctx(),
                Some(json!({ "action": "approve" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
