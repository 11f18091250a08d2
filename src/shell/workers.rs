// Background relay draining the notification outbox into the sink. Rows are
// acknowledged only after the sink accepted them, so a sink outage leaves
// them pending for the next pass.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::shared::core::notifications::NotificationIntent;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::notification_sink::{Notification, NotificationSink};

pub struct NotificationRelay<TOutbox, TSink>
where
    TOutbox: DomainOutbox + 'static,
    TSink: NotificationSink + 'static,
{
    outbox: Arc<TOutbox>,
    sink: Arc<TSink>,
    batch_size: usize,
}

impl<TOutbox, TSink> NotificationRelay<TOutbox, TSink>
where
    TOutbox: DomainOutbox + 'static,
    TSink: NotificationSink + 'static,
{
    pub fn new(outbox: Arc<TOutbox>, sink: Arc<TSink>, batch_size: usize) -> Self {
        Self {
            outbox,
            sink,
            batch_size: batch_size.max(1),
        }
    }

    /// Delivers one batch of pending rows. Returns how many reached the sink.
    pub async fn run_once(&self) -> anyhow::Result<usize> {
        let rows = self.outbox.pending(self.batch_size).await?;
        let mut delivered = 0;
        for row in rows {
            match serde_json::from_value::<NotificationIntent>(row.payload.clone()) {
                Ok(intent) => {
                    self.sink
                        .create(Notification::from_intent(intent, Utc::now()))
                        .await?;
                    delivered += 1;
                }
                Err(error) => {
                    tracing::warn!(
                        stream_id = %row.stream_id,
                        stream_version = row.stream_version,
                        %error,
                        "dropping malformed outbox row"
                    );
                }
            }
            self.outbox
                .mark_delivered(&row.stream_id, row.stream_version)
                .await?;
        }
        Ok(delivered)
    }

    pub async fn run(self, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match self.run_once().await {
                Ok(0) => {}
                Ok(count) => tracing::debug!(count, "notifications relayed"),
                Err(error) => tracing::warn!(%error, "notification relay failed"),
            }
        }
    }
}
