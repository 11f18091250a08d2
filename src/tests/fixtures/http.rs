use axum::body::Body;
use axum::http::{Method, Request, Response};
use http_body_util::BodyExt;
use serde_json::Value;

use crate::shared::core::primitives::{AccessContext, Role};

fn role_header(role: Role) -> &'static str {
    match role {
        Role::Admin => "admin",
        Role::Manager => "manager",
        Role::Employee => "employee",
    }
}

/// A request carrying the gateway identity headers of `caller`.
pub fn request(method: Method, uri: &str, caller: &AccessContext, body: Option<Value>) -> Request<Body> {
    let locations = caller
        .location_ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-user-id", caller.user_id.to_string())
        .header("x-user-role", role_header(caller.role))
        .header("x-tenant-id", caller.tenant_id.to_string())
        .header("x-organization-id", caller.organization_id.to_string())
        .header("x-location-ids", locations);
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
