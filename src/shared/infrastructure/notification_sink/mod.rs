// Port to the notification sink: an append-only "create notification for
// user X". Delivery channels (in-app, email) live behind it.

pub mod in_memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::shared::core::notifications::{NotificationIntent, NotificationKind};
use crate::shared::core::primitives::{TenantId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub read: bool,
    pub urgent: bool,
    pub action_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn from_intent(intent: NotificationIntent, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            tenant_id: intent.tenant_id,
            user_id: intent.recipient_id,
            title: intent.title,
            message: intent.message,
            kind: intent.kind,
            read: false,
            urgent: intent.urgent,
            action_url: intent.action_url,
            created_at,
        }
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn create(&self, notification: Notification) -> Result<(), SinkError>;
}
