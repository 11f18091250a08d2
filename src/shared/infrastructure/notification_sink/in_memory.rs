use crate::shared::core::primitives::UserId;
use crate::shared::infrastructure::notification_sink::{Notification, NotificationSink, SinkError};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryNotificationSink {
    notifications: RwLock<Vec<Notification>>,
    is_offline: bool,
}

impl InMemoryNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn all(&self) -> Vec<Notification> {
        self.notifications.read().await.clone()
    }

    pub async fn for_user(&self, user_id: UserId) -> Vec<Notification> {
        self.notifications
            .read()
            .await
            .iter()
            .filter(|notification| notification.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl NotificationSink for InMemoryNotificationSink {
    async fn create(&self, notification: Notification) -> Result<(), SinkError> {
        if self.is_offline {
            return Err(SinkError::Backend("Notification sink offline".into()));
        }
        self.notifications.write().await.push(notification);
        Ok(())
    }
}
