use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use uuid::Uuid;

use crate::modules::approvals::core::requests::RequestDecision;
use crate::modules::approvals::use_cases::decide_leave_request::handler::LeaveDecisionHandler;
use crate::shared::core::errors::ApplicationError;
use crate::shell::identity::Caller;
use crate::shell::response;
use crate::shell::state::AppState;

/// Serves both the admin and the manager leave decision routes.
pub async fn handle(
    State(state): State<AppState>,
    Caller(context): Caller,
    Path(id): Path<Uuid>,
    body: Result<Json<RequestDecision>, JsonRejection>,
) -> Result<Response, ApplicationError> {
    let Json(command) = body?;
    let request = LeaveDecisionHandler::new(state.ports.clone())
        .handle(&context, id, command)
        .await?;
    Ok(response::ok(request))
}

#[cfg(test)]
mod decide_leave_request_http_inbound_tests {
    use axum::http::{Method, StatusCode};
    use rstest::rstest;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::tests::fixtures::approvals::LeaveRequestBuilder;
    use crate::tests::fixtures::http::{read_json, request};
    use crate::tests::fixtures::world::{TestWorld, world};

    #[rstest]
    #[tokio::test]
    async fn it_should_require_a_rejection_reason(world: TestWorld) {
        let leave = LeaveRequestBuilder::new()
            .tenant_id(world.tenant_id)
            .employee_id(world.alice.id)
            .build();
        let uri = format!("/admin/leave-requests/{}", leave.id);
        world
            .seed(move |tables| {
                tables.leave_requests.insert(leave.id, leave);
            })
            .await;

        let response = world
            .app()
            .oneshot(request(
                Method::PATCH,
                &uri,
                &world.admin_ctx(),
                Some(json!({ "action": "reject", "rejection_reason": "" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["details"][0]["path"], "rejection_reason");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_accept_decisions_on_the_manager_route() {
        let world = TestWorld::with_manager_approvals();
        let leave = LeaveRequestBuilder::new()
            .tenant_id(world.tenant_id)
            .employee_id(world.bob.id)
            .build();
        let uri = format!("/manager/approvals/leave-request/{}", leave.id);
        world
            .seed(move |tables| {
                tables.leave_requests.insert(leave.id, leave);
            })
            .await;

        let response = world
            .app()
            .oneshot(request(
                Method::PATCH,
                &uri,
                &world.manager_ctx(),
                Some(json!({ "action": "reject", "rejection_reason": "Short staffed" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["data"]["status"], "rejected");
        assert_eq!(json["data"]["rejection_reason"], "Short staffed");
    }
}
