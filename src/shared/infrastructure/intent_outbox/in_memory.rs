use crate::shared::infrastructure::intent_outbox::{DomainOutbox, OutboxError, OutboxRow};
use std::collections::{HashSet, VecDeque};
use tokio::sync::Mutex;

/// Delivered keys remembered for duplicate detection.
const DELIVERED_WINDOW: usize = 1024;

type RowKey = (String, i64);

#[derive(Default)]
struct Rows {
    pending: VecDeque<OutboxRow>,
    delivered: VecDeque<RowKey>,
    /// Keys of `pending` and `delivered`.
    known: HashSet<RowKey>,
}

impl Rows {
    fn remember_delivered(&mut self, key: RowKey) {
        self.delivered.push_back(key);
        while self.delivered.len() > DELIVERED_WINDOW {
            if let Some(evicted) = self.delivered.pop_front() {
                self.known.remove(&evicted);
            }
        }
    }
}

/// Keeps only undelivered rows. Acknowledged rows are dropped, with their keys
/// kept in a bounded window so a replayed enqueue is still refused.
#[derive(Default)]
pub struct InMemoryDomainOutbox {
    rows: Mutex<Rows>,
    is_offline: bool,
}

impl InMemoryDomainOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Rows currently held, delivered ones excluded.
    pub async fn pending_count(&self) -> usize {
        self.rows.lock().await.pending.len()
    }

    fn ensure_online(&self) -> Result<(), OutboxError> {
        if self.is_offline {
            return Err(OutboxError::Backend("Outbox offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl DomainOutbox for InMemoryDomainOutbox {
    async fn enqueue(&self, row: OutboxRow) -> Result<(), OutboxError> {
        self.ensure_online()?;
        let mut rows = self.rows.lock().await;
        if !rows.known.insert((row.stream_id.clone(), row.stream_version)) {
            return Err(OutboxError::Duplicate {
                stream_id: row.stream_id,
                stream_version: row.stream_version,
            });
        }
        rows.pending.push_back(row);
        Ok(())
    }

    async fn pending(&self, limit: usize) -> Result<Vec<OutboxRow>, OutboxError> {
        self.ensure_online()?;
        Ok(self
            .rows
            .lock()
            .await
            .pending
            .iter()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn mark_delivered(
        &self,
        stream_id: &str,
        stream_version: i64,
    ) -> Result<(), OutboxError> {
        self.ensure_online()?;
        let mut rows = self.rows.lock().await;
        let position = rows
            .pending
            .iter()
            .position(|row| row.stream_id == stream_id && row.stream_version == stream_version);
        if let Some(position) = position {
            rows.pending.remove(position);
            rows.remember_delivered((stream_id.to_string(), stream_version));
        }
        Ok(())
    }
}

#[cfg(test)]
mod in_memory_domain_outbox_tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> OutboxRow {
        OutboxRow {
            topic: "test_topic".to_string(),
            event_type: "test_event_type".to_string(),
            event_version: 1,
            stream_id: "123".to_string(),
            stream_version: 1,
            occurred_at: 0,
            payload: serde_json::json!({ "title": "Teddy Test" }),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_enqueue_the_row(row: OutboxRow) {
        let outbox = InMemoryDomainOutbox::new();
        assert!(outbox.enqueue(row).await.is_ok());
        assert_eq!(outbox.pending_count().await, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_to_enqueue_a_duplicate_row(row: OutboxRow) {
        let outbox = InMemoryDomainOutbox::new();
        outbox.enqueue(row.clone()).await.unwrap();
        let result = outbox.enqueue(row).await;
        assert!(matches!(
            result,
            Err(OutboxError::Duplicate {
                stream_id: _,
                stream_version: 1
            })
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_hide_delivered_rows_from_pending(row: OutboxRow) {
        let outbox = InMemoryDomainOutbox::new();
        let mut second = row.clone();
        second.stream_version = 2;
        outbox.enqueue(row).await.unwrap();
        outbox.enqueue(second).await.unwrap();
        outbox.mark_delivered("123", 1).await.unwrap();

        let pending = outbox.pending(10).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].stream_version, 2);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_when_offline(row: OutboxRow) {
        let mut outbox = InMemoryDomainOutbox::new();
        outbox.toggle_offline();
        let result = outbox.enqueue(row).await;
        assert!(result.unwrap_err().to_string().contains("Outbox offline"));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_drop_rows_once_delivered(row: OutboxRow) {
        let outbox = InMemoryDomainOutbox::new();
        for round in 0..3 {
            for version in 1..=50 {
                let mut next = row.clone();
                next.stream_id = format!("stream-{round}");
                next.stream_version = version;
                outbox.enqueue(next).await.unwrap();
            }
            assert_eq!(outbox.pending_count().await, 50);
            for delivered in outbox.pending(100).await.unwrap() {
                outbox
                    .mark_delivered(&delivered.stream_id, delivered.stream_version)
                    .await
                    .unwrap();
            }
            assert_eq!(outbox.pending_count().await, 0);
            assert!(outbox.pending(100).await.unwrap().is_empty());
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_refuse_replaying_a_recently_delivered_row(row: OutboxRow) {
        let outbox = InMemoryDomainOutbox::new();
        outbox.enqueue(row.clone()).await.unwrap();
        outbox.mark_delivered("123", 1).await.unwrap();
        assert!(matches!(
            outbox.enqueue(row).await,
            Err(OutboxError::Duplicate { .. })
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_bound_the_remembered_delivered_keys(row: OutboxRow) {
        let outbox = InMemoryDomainOutbox::new();
        let total = DELIVERED_WINDOW as i64 + 10;
        for version in 1..=total {
            let mut next = row.clone();
            next.stream_version = version;
            outbox.enqueue(next).await.unwrap();
            outbox.mark_delivered("123", version).await.unwrap();
        }
        let rows = outbox.rows.lock().await;
        assert_eq!(rows.delivered.len(), DELIVERED_WINDOW);
        assert_eq!(rows.known.len(), DELIVERED_WINDOW);
        assert!(rows.pending.is_empty());
    }
}
