// Outbox of side effects decided by committed transactions.
//
// Handlers commit their primary mutation first, then enqueue one row per
// notification intent. A relay drains pending rows into the notification
// sink, so a failed delivery is retried without re-running the mutation.

pub mod dispatch;
pub mod in_memory;

use async_trait::async_trait;
use serde_json::Value as Json;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct OutboxRow {
    pub topic: String,
    pub event_type: String,
    pub event_version: i32,
    pub stream_id: String,
    pub stream_version: i64,
    pub occurred_at: i64,
    pub payload: Json,
}

#[derive(Debug, Error)]
pub enum OutboxError {
    #[error("duplicate outbox row for stream {stream_id} v{stream_version}")]
    Duplicate {
        stream_id: String,
        stream_version: i64,
    },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait DomainOutbox: Send + Sync {
    async fn enqueue(&self, row: OutboxRow) -> Result<(), OutboxError>;

    /// Rows not yet acknowledged by the relay, oldest first.
    async fn pending(&self, limit: usize) -> Result<Vec<OutboxRow>, OutboxError>;

    async fn mark_delivered(&self, stream_id: &str, stream_version: i64)
    -> Result<(), OutboxError>;
}
