use axum::Router;
use axum::http::{Method, StatusCode};
use rstest::rstest;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::modules::approvals::core::state::ApprovalStatus;
use crate::modules::scheduling::core::state::AssignmentStatus;
use crate::shared::core::primitives::AccessContext;
use crate::tests::fixtures::http::{read_json, request};
use crate::tests::fixtures::scheduling::AssignmentBuilder;
use crate::tests::fixtures::time::{TimeEntryBuilder, june_10};
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

#[rstest]
#[tokio::test]
async fn it_should_run_a_shift_from_clock_in_to_approval_queue(world: TestWorld) {
    let app = world.app();
    let alice = world.ctx_of(&world.alice);

    let (status, entry) = send(&app, Method::POST, "/time/clock-in", &alice, Some(json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["data"]["status"], "in-progress");
    assert!(world.read(|tables| tables.employees[&world.alice.id].is_online).await);

    let (status, _) = send(&app, Method::POST, "/time/clock-in", &alice, Some(json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::POST, "/time/break-start", &alice, Some(json!({}))).await;
    assert!(status.is_success());
    let (status, _) = send(&app, Method::POST, "/time/break-start", &alice, Some(json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, _) = send(&app, Method::POST, "/time/break-end", &alice, Some(json!({}))).await;
    assert!(status.is_success());

    let (status, closed) = send(&app, Method::POST, "/time/clock-out", &alice, Some(json!({ "shift_remarks": "quiet day" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(closed["data"]["status"], "completed");
    assert_eq!(closed["data"]["approval_status"], "pending");
    assert!(!world.read(|tables| tables.employees[&world.alice.id].is_online).await);

    let intents = world.intents().await;
    assert!(
        intents
            .iter()
            .any(|intent| intent.recipient_id == world.admin.id && intent.title == "Shift needs approval")
    );

    let (status, _) = send(&app, Method::POST, "/time/clock-out", &alice, Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn it_should_flag_a_twelve_minute_late_start(world: TestWorld) {
    let assignment = AssignmentBuilder::new()
        .tenant_id(world.tenant_id)
        .employee_id(world.alice.id)
        .status(AssignmentStatus::Published)
        .build();
    let entry = TimeEntryBuilder::new()
        .tenant_id(world.tenant_id)
        .employee_id(world.alice.id)
        .assignment_id(assignment.id)
        .clock_in(june_10(9, 12))
        .completed(june_10(17, 0))
        .build();
    let (assignment_row, entry_row) = (assignment.clone(), entry.clone());
    world
        .seed(move |tables| {
            tables.assignments.insert(assignment_row.id, assignment_row);
            tables.time_entries.insert(entry_row.id, entry_row);
        })
        .await;

    let (status, json) = send(
        &world.app(),
        Method::GET,
        &format!("/time/entries/{}/discrepancies", entry.id),
        &world.manager_ctx(),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["assignment_id"], assignment.id.to_string());
    let found = json["data"]["discrepancies"].as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["kind"], "late_clock_in");
    assert_eq!(found[0]["severity"], "warning");
    assert_eq!(found[0]["minutes"], 12);
}

#[rstest]
#[tokio::test]
async fn it_should_pay_eight_hours_for_a_half_hour_break(world: TestWorld) {
    let entry = TimeEntryBuilder::new()
        .tenant_id(world.tenant_id)
        .employee_id(world.alice.id)
        .break_hours(dec!(0.5))
        .completed(june_10(17, 30))
        .build();
    assert_eq!(entry.total_hours, dec!(8.0));
    let row = entry.clone();
    world
        .seed(move |tables| {
            tables.time_entries.insert(row.id, row);
        })
        .await;

    let (status, json) = send(
        &world.app(),
        Method::PATCH,
        &format!("/admin/shift-approvals/{}", entry.id),
        &world.admin_ctx(),
        Some(json!({ "action": "approve" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["approval_status"], "approved");
    assert_eq!(json["data"]["total_pay"], 120.0);

    let stored = world.read(|tables| tables.time_entries[&entry.id].clone()).await;
    assert_eq!(stored.approval_status, ApprovalStatus::Approved);
    assert_eq!(stored.approved_hours, Some(dec!(8.0)));
}

#[rstest]
#[tokio::test]
async fn it_should_not_let_employees_edit_their_own_entries(world: TestWorld) {
    let entry = TimeEntryBuilder::new()
        .tenant_id(world.tenant_id)
        .employee_id(world.alice.id)
        .completed(june_10(17, 0))
        .build();
    let row = entry.clone();
    world
        .seed(move |tables| {
            tables.time_entries.insert(row.id, row);
        })
        .await;

    let (status, _) = send(
        &world.app(),
        Method::PATCH,
        &format!("/time/entries/{}", entry.id),
        &world.ctx_of(&world.alice),
        Some(json!({ "break_hours": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
