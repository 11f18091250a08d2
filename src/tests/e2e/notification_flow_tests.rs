use axum::http::{Method, StatusCode};
use rstest::rstest;
use serde_json::json;
use tower::ServiceExt;

use crate::shell::workers::NotificationRelay;
use crate::tests::fixtures::http::request;
use crate::tests::fixtures::world::{TestWorld, world};

#[rstest]
#[tokio::test]
async fn it_should_relay_committed_notifications_to_the_sink(world: TestWorld) {
    let app = world.app();
    for employee_id in [world.alice.id, world.bob.id] {
        let response = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/scheduling/assign",
                &world.admin_ctx(),
                Some(json!({
                    "employee_id": employee_id,
                    "date": "2024-06-12",
                    "override_name": "Late",
                    "override_start_time": "14:00:00",
                    "override_end_time": "22:00:00"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    let response = app
        .oneshot(request(
            Method::POST,
            "/scheduling/publish",
            &world.admin_ctx(),
            Some(json!({ "start_date": "2024-06-10", "end_date": "2024-06-16" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(world.sink.all().await.is_empty());

    let relay = NotificationRelay::new(world.outbox.clone(), world.sink.clone(), 10);
    assert_eq!(relay.run_once().await.unwrap(), 2);

    for employee in [&world.alice, &world.bob] {
        let delivered = world.sink.for_user(employee.id).await;
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].title, "Schedule published");
        assert_eq!(delivered[0].tenant_id, world.tenant_id);
    }
    assert_eq!(relay.run_once().await.unwrap(), 0);
}
