use axum::Router;
use axum::http::{Method, StatusCode};
use chrono::NaiveDate;
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use crate::modules::approvals::core::state::ApprovalStatus;
use crate::modules::scheduling::core::shift::ShiftAssignment;
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

fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

fn published_shift(world: &TestWorld, employee_id: Uuid, day: u32) -> ShiftAssignment {
    AssignmentBuilder::new()
        .tenant_id(world.tenant_id)
        .employee_id(employee_id)
        .date(june(day))
        .status(AssignmentStatus::Published)
        .build()
}

async fn seed_shifts(world: &TestWorld, shifts: &[ShiftAssignment]) {
    let rows = shifts.to_vec();
    world
        .seed(move |tables| {
            for row in rows {
                tables.assignments.insert(row.id, row);
            }
        })
        .await;
}

#[rstest]
#[tokio::test]
async fn it_should_cancel_only_the_shifts_covered_by_approved_leave(world: TestWorld) {
    let before = published_shift(&world, world.alice.id, 9);
    let during = published_shift(&world, world.alice.id, 12);
    let after = published_shift(&world, world.alice.id, 16);
    seed_shifts(&world, &[before.clone(), during.clone(), after.clone()]).await;
    let app = world.app();

    let (status, submitted) = send(
        &app,
        Method::POST,
        "/leave-requests",
        &world.ctx_of(&world.alice),
        Some(json!({
            "leave_type": "annual",
            "start_date": "2024-06-10",
            "end_date": "2024-06-14",
            "reason": "Family holiday"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(submitted["data"]["days_requested"], 5);
    let id = submitted["data"]["id"].as_str().unwrap().to_string();

    let (status, overlapping) = send(
        &app,
        Method::POST,
        "/leave-requests",
        &world.ctx_of(&world.alice),
        Some(json!({ "leave_type": "personal", "start_date": "2024-06-14", "end_date": "2024-06-15" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(overlapping["success"], false);

    let (status, decided) = send(
        &app,
        Method::PATCH,
        &format!("/admin/leave-requests/{id}"),
        &world.admin_ctx(),
        Some(json!({ "action": "approve" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decided["data"]["status"], "approved");

    let stored = world.read(|tables| tables.assignments.clone()).await;
    assert_eq!(stored[&before.id].status, AssignmentStatus::Published);
    assert_eq!(stored[&after.id].status, AssignmentStatus::Published);
    assert_eq!(stored[&during.id].status, AssignmentStatus::Cancelled);
    assert_eq!(
        stored[&during.id].cancellation_reason.as_deref(),
        Some("Employee on approved leave")
    );
    let history = world.read(|tables| tables.approval_history.len()).await;
    assert_eq!(history, 1);
}

#[rstest]
#[tokio::test]
async fn it_should_count_only_the_timesheets_it_approved(world: TestWorld) {
    let entry = |employee_id: Uuid| {
        TimeEntryBuilder::new()
            .tenant_id(world.tenant_id)
            .employee_id(employee_id)
            .completed(june_10(17, 0))
            .build()
    };
    let (first, third) = (entry(world.alice.id), entry(world.bob.id));
    let rows = vec![first.clone(), third.clone()];
    world
        .seed(move |tables| {
            for row in rows {
                tables.time_entries.insert(row.id, row);
            }
        })
        .await;

    let (status, json) = send(
        &world.app(),
        Method::POST,
        "/admin/timesheet/bulk-approve",
        &world.admin_ctx(),
        Some(json!({ "entry_ids": [first.id, Uuid::now_v7(), third.id] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["approved_count"], 2);
    assert_eq!(json["data"]["total_requested"], 3);

    let statuses = world
        .read(|tables| {
            [first.id, third.id].map(|id| tables.time_entries[&id].approval_status)
        })
        .await;
    assert_eq!(statuses, [ApprovalStatus::Approved, ApprovalStatus::Approved]);
    let notified: Vec<Uuid> = world.intents().await.iter().map(|intent| intent.recipient_id).collect();
    assert!(notified.contains(&world.alice.id));
    assert!(notified.contains(&world.bob.id));
}

#[rstest]
#[tokio::test]
async fn it_should_require_a_reason_to_reject_a_timesheet(world: TestWorld) {
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
    let app = world.app();
    let uri = format!("/admin/shift-approvals/{}", entry.id);

    let (status, json) = send(&app, Method::PATCH, &uri, &world.admin_ctx(), Some(json!({ "action": "reject" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["details"][0]["path"], "rejection_reason");

    let (status, json) = send(
        &app,
        Method::PATCH,
        &uri,
        &world.admin_ctx(),
        Some(json!({ "action": "reject", "rejection_reason": "Clock-in not verified" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["approval_status"], "rejected");

    let intents = world.intents().await;
    assert_eq!(intents.len(), 1);
    assert_eq!(intents[0].recipient_id, world.alice.id);
    assert!(intents[0].message.contains("Clock-in not verified"));

    let (status, _) = send(&app, Method::PATCH, &uri, &world.admin_ctx(), Some(json!({ "action": "approve" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[rstest]
#[tokio::test]
async fn it_should_exchange_shifts_once_a_swap_is_approved(world: TestWorld) {
    let mine = published_shift(&world, world.alice.id, 12);
    let theirs = published_shift(&world, world.bob.id, 13);
    seed_shifts(&world, &[mine.clone(), theirs.clone()]).await;
    let app = world.app();

    let (status, submitted) = send(
        &app,
        Method::POST,
        "/swap-requests",
        &world.ctx_of(&world.alice),
        Some(json!({
            "original_shift_id": mine.id,
            "requested_shift_id": theirs.id,
            "target_id": world.bob.id,
            "reason": "Dentist"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = submitted["data"]["id"].as_str().unwrap().to_string();

    let (status, decided) = send(
        &app,
        Method::PATCH,
        &format!("/admin/swap-requests/{id}"),
        &world.admin_ctx(),
        Some(json!({ "action": "approve" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decided["data"]["status"], "approved");

    let stored = world.read(|tables| tables.assignments.clone()).await;
    assert_eq!(stored[&mine.id].employee_id, world.bob.id);
    assert_eq!(stored[&theirs.id].employee_id, world.alice.id);
}

#[rstest]
#[tokio::test]
async fn it_should_only_let_managers_decide_leave_when_the_tenant_allows_it() {
    let world = TestWorld::with_manager_approvals();
    let request = crate::tests::fixtures::approvals::LeaveRequestBuilder::new()
        .tenant_id(world.tenant_id)
        .employee_id(world.alice.id)
        .build();
    let row = request.clone();
    world
        .seed(move |tables| {
            tables.leave_requests.insert(row.id, row);
        })
        .await;

    let (status, json) = send(
        &world.app(),
        Method::PATCH,
        &format!("/manager/approvals/leave-request/{}", request.id),
        &world.manager_ctx(),
        Some(json!({ "action": "reject", "rejection_reason": "Peak season" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "rejected");
    assert_eq!(json["data"]["rejection_reason"], "Peak season");
}

#[rstest]
#[tokio::test]
async fn it_should_keep_managers_from_swapping_in_a_shift_from_another_location() {
    let world = TestWorld::with_manager_approvals();
    let mine = published_shift(&world, world.alice.id, 12);
    let theirs = published_shift(&world, world.remote.id, 13);
    seed_shifts(&world, &[mine.clone(), theirs.clone()]).await;
    let app = world.app();

    let (status, submitted) = send(
        &app,
        Method::POST,
        "/swap-requests",
        &world.ctx_of(&world.alice),
        Some(json!({
            "original_shift_id": mine.id,
            "requested_shift_id": theirs.id,
            "target_id": world.remote.id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = submitted["data"]["id"].as_str().unwrap().to_string();

    let (status, json) = send(
        &app,
        Method::PATCH,
        &format!("/admin/swap-requests/{id}"),
        &world.manager_ctx(),
        Some(json!({ "action": "approve" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["success"], false);

    let stored = world.read(|tables| tables.assignments.clone()).await;
    assert_eq!(stored[&mine.id].employee_id, world.alice.id);
    assert_eq!(stored[&theirs.id].employee_id, world.remote.id);
}
