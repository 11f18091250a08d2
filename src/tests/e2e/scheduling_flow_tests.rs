use axum::Router;
use axum::http::{Method, StatusCode};
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::shared::core::primitives::AccessContext;
use crate::tests::fixtures::http::{read_json, request};
use crate::tests::fixtures::world::{TestWorld, world};

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    caller: &AccessContext,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request(method, uri, caller, body))
        .await
        .unwrap();
    let status = response.status();
    (status, read_json(response).await)
}

fn cover_shift(employee_id: uuid::Uuid, date: &str) -> Value {
    json!({
        "employee_id": employee_id,
        "date": date,
        "override_name": "Cover",
        "override_start_time": "09:00:00",
        "override_end_time": "17:00:00"
    })
}

#[rstest]
#[tokio::test]
async fn it_should_keep_one_live_assignment_per_employee_and_day(world: TestWorld) {
    let app = world.app();
    let admin = world.admin_ctx();

    let (status, _) = send(&app, Method::POST, "/scheduling/assign", &admin, Some(cover_shift(world.alice.id, "2024-06-12"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, json) = send(&app, Method::POST, "/scheduling/assign", &admin, Some(cover_shift(world.alice.id, "2024-06-12"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["success"], false);

    let (status, _) = send(&app, Method::POST, "/scheduling/assign", &admin, Some(cover_shift(world.bob.id, "2024-06-12"))).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[rstest]
#[tokio::test]
async fn it_should_refuse_to_publish_an_empty_range(world: TestWorld) {
    let (status, json) = send(
        &world.app(),
        Method::POST,
        "/scheduling/publish",
        &world.admin_ctx(),
        Some(json!({ "start_date": "2024-06-10", "end_date": "2024-06-16" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(world.intents().await.is_empty());
}

#[rstest]
#[tokio::test]
async fn it_should_only_delete_once_the_rota_is_back_in_draft(world: TestWorld) {
    let app = world.app();
    let admin = world.admin_ctx();

    let (_, rota) = send(&app, Method::POST, "/scheduling/rotas", &admin, Some(json!({ "name": "Week 24", "week_start_date": "2024-06-10" }))).await;
    let rota_id = rota["data"]["id"].as_str().unwrap().to_string();

    let mut shift = cover_shift(world.alice.id, "2024-06-12");
    shift["rota_id"] = json!(rota_id);
    let (status, assignment) = send(&app, Method::POST, "/scheduling/assign", &admin, Some(shift)).await;
    assert_eq!(status, StatusCode::CREATED);
    let assignment_id = assignment["data"]["id"].as_str().unwrap().to_string();

    let (status, published) = send(&app, Method::POST, &format!("/scheduling/rotas/{rota_id}/publish"), &admin, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(published["data"]["published_shifts"], 1);

    let delete_uri = format!("/scheduling/assign?id={assignment_id}");
    let (status, _) = send(&app, Method::DELETE, &delete_uri, &admin, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, reverted) = send(&app, Method::POST, &format!("/scheduling/rotas/{rota_id}/revert"), &admin, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reverted["data"]["status"], "draft");

    let (status, deleted) = send(&app, Method::DELETE, &delete_uri, &admin, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["data"]["id"], assignment_id.as_str());
}

#[rstest]
#[tokio::test]
async fn it_should_hide_drafts_from_employees_in_the_week_view(world: TestWorld) {
    let app = world.app();
    let admin = world.admin_ctx();
    let (_, draft) = send(&app, Method::POST, "/scheduling/assign", &admin, Some(cover_shift(world.alice.id, "2024-06-11"))).await;
    let (_, other) = send(&app, Method::POST, "/scheduling/assign", &admin, Some(cover_shift(world.alice.id, "2024-06-12"))).await;
    let other_id = other["data"]["id"].clone();
    let (status, _) = send(&app, Method::POST, "/scheduling/publish", &admin, Some(json!({ "shift_ids": [other_id] }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, week) = send(&app, Method::GET, "/scheduling/week/2024-06-12", &world.ctx_of(&world.alice), None).await;
    assert_eq!(status, StatusCode::OK);
    let body = week["data"].to_string();
    assert!(body.contains(other_id.as_str().unwrap()));
    assert!(!body.contains(draft["data"]["id"].as_str().unwrap()));

    let published = world.intents().await;
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].recipient_id, world.alice.id);
}
