use serde::{Deserialize, Serialize};

use crate::shared::core::primitives::{TenantId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Schedule,
    ScheduleChange,
    Timesheet,
    Leave,
    ShiftSwap,
}

/// A notification the core decided to send. Published through the outbox
/// after the deciding transaction commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationIntent {
    pub tenant_id: TenantId,
    pub recipient_id: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub action_url: Option<String>,
    pub urgent: bool,
}

impl NotificationIntent {
    pub fn new(
        tenant_id: TenantId,
        recipient_id: UserId,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id,
            recipient_id,
            kind,
            title: title.into(),
            message: message.into(),
            action_url: None,
            urgent: false,
        }
    }

    pub fn with_action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }

    pub fn urgent(mut self, urgent: bool) -> Self {
        self.urgent = urgent;
        self
    }
}
