// Caller identity as forwarded by the gateway in trusted headers. A missing
// or malformed identity is rejected with 401 before any handler runs.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{AccessContext, Role};

pub const USER_ID: &str = "x-user-id";
pub const USER_ROLE: &str = "x-user-role";
pub const TENANT_ID: &str = "x-tenant-id";
pub const ORGANIZATION_ID: &str = "x-organization-id";
pub const LOCATION_IDS: &str = "x-location-ids";

#[derive(Debug, Clone)]
pub struct Caller(pub AccessContext);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApplicationError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        resolve(&parts.headers)
            .map(Caller)
            .ok_or(ApplicationError::Unauthorized)
    }
}

pub fn resolve(headers: &HeaderMap) -> Option<AccessContext> {
    let location_ids = match header(headers, LOCATION_IDS) {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| Uuid::parse_str(part).ok())
            .collect::<Option<Vec<_>>>()?,
        None => Vec::new(),
    };
    Some(AccessContext {
        user_id: uuid_header(headers, USER_ID)?,
        role: header(headers, USER_ROLE).and_then(Role::parse)?,
        tenant_id: uuid_header(headers, TENANT_ID)?,
        organization_id: uuid_header(headers, ORGANIZATION_ID)?,
        location_ids,
    })
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn uuid_header(headers: &HeaderMap, name: &str) -> Option<Uuid> {
    header(headers, name).and_then(|raw| Uuid::parse_str(raw.trim()).ok())
}
