use std::sync::Arc;

use uuid::Uuid;

use crate::shared::core::notifications::NotificationIntent;
use crate::shared::infrastructure::database::Database;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::intent_outbox::dispatch::publish_after_commit;

/// Outbound dependencies every command handler is built from.
pub struct Ports<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    pub topic: String,
    pub database: Arc<Database>,
    pub outbox: Arc<TOutbox>,
}

impl<TOutbox> Ports<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    pub fn new(topic: impl Into<String>, database: Arc<Database>, outbox: Arc<TOutbox>) -> Self {
        Self {
            topic: topic.into(),
            database,
            outbox,
        }
    }

    /// Enqueue the intents of one committed change. Each change gets its own
    /// outbox stream under `source`, so retries never collide on versions.
    pub async fn publish(&self, source: &str, intents: Vec<NotificationIntent>) -> bool {
        let stream_id = format!("{source}/{}", Uuid::now_v7());
        publish_after_commit(&*self.outbox, &stream_id, 0, &self.topic, intents).await
    }
}

impl<TOutbox> Clone for Ports<TOutbox>
where
    TOutbox: DomainOutbox + 'static,
{
    fn clone(&self) -> Self {
        Self {
            topic: self.topic.clone(),
            database: self.database.clone(),
            outbox: self.outbox.clone(),
        }
    }
}
