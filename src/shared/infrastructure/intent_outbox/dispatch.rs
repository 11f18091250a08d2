use chrono::Utc;

use crate::shared::core::notifications::NotificationIntent;
use crate::shared::infrastructure::intent_outbox::{DomainOutbox, OutboxError, OutboxRow};

pub const NOTIFICATION_REQUESTED: &str = "NotificationRequested";

/// Translate notification intents into outbox rows and enqueue them.
/// `starting_version` is the stream version before the committed change.
/// Each intent takes one new version: starting_version + index + 1.
pub async fn dispatch_intents(
    outbox: &impl DomainOutbox,
    stream_id: &str,
    starting_version: i64,
    topic: &str,
    intents: Vec<NotificationIntent>,
) -> Result<(), OutboxError> {
    let occurred_at = Utc::now().timestamp_millis();
    for (i, intent) in intents.into_iter().enumerate() {
        let stream_version = starting_version + i as i64 + 1;
        let payload =
            serde_json::to_value(&intent).map_err(|e| OutboxError::Validation(e.to_string()))?;
        outbox
            .enqueue(OutboxRow {
                topic: topic.to_string(),
                event_type: NOTIFICATION_REQUESTED.to_string(),
                event_version: 1,
                stream_id: stream_id.to_string(),
                stream_version,
                occurred_at,
                payload,
            })
            .await?;
    }
    Ok(())
}

/// Publish after the primary mutation committed. Failures are logged and
/// reported, never propagated: the decision itself already stands.
pub async fn publish_after_commit(
    outbox: &impl DomainOutbox,
    stream_id: &str,
    starting_version: i64,
    topic: &str,
    intents: Vec<NotificationIntent>,
) -> bool {
    if intents.is_empty() {
        return false;
    }
    let count = intents.len();
    match dispatch_intents(outbox, stream_id, starting_version, topic, intents).await {
        Ok(()) => {
            tracing::debug!(stream_id, count, "notifications enqueued");
            true
        }
        Err(error) => {
            tracing::warn!(stream_id, %error, "failed to enqueue notifications");
            false
        }
    }
}

#[cfg(test)]
mod dispatch_tests {
    use super::*;
    use crate::shared::core::notifications::NotificationKind;
    use crate::shared::infrastructure::intent_outbox::in_memory::InMemoryDomainOutbox;
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    #[fixture]
    fn intents() -> Vec<NotificationIntent> {
        let tenant_id = Uuid::now_v7();
        vec![
            NotificationIntent::new(
                tenant_id,
                Uuid::now_v7(),
                NotificationKind::Schedule,
                "Schedule published",
                "first",
            ),
            NotificationIntent::new(
                tenant_id,
                Uuid::now_v7(),
                NotificationKind::Schedule,
                "Schedule published",
                "second",
            ),
        ]
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_enqueue_one_row_per_intent_with_increasing_versions(
        intents: Vec<NotificationIntent>,
    ) {
        let outbox = InMemoryDomainOutbox::new();
        dispatch_intents(&outbox, "Rota-1", 3, "notifications", intents)
            .await
            .unwrap();
        let rows = outbox.pending(10).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].stream_version, 4);
        assert_eq!(rows[1].stream_version, 5);
        assert_eq!(rows[0].event_type, NOTIFICATION_REQUESTED);
        assert_eq!(rows[1].payload["message"], "second");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_swallow_outbox_failures_after_commit(intents: Vec<NotificationIntent>) {
        let mut outbox = InMemoryDomainOutbox::new();
        outbox.toggle_offline();
        let sent = publish_after_commit(&outbox, "Rota-1", 0, "notifications", intents).await;
        assert!(!sent);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_report_nothing_sent_for_no_intents() {
        let outbox = InMemoryDomainOutbox::new();
        let sent = publish_after_commit(&outbox, "Rota-1", 0, "notifications", vec![]).await;
        assert!(!sent);
    }
}
