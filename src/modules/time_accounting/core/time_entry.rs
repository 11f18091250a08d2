use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::approvals::core::state::ApprovalStatus;
use crate::modules::time_accounting::core::errors::TimeAccountingError;
use crate::shared::core::primitives::{EmployeeId, TenantId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryStatus {
    InProgress,
    Break,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAction {
    StartBreak,
    EndBreak,
    ClockOut,
}

impl EntryStatus {
    pub fn is_active(self) -> bool {
        matches!(self, EntryStatus::InProgress | EntryStatus::Break)
    }

    pub fn apply(self, action: EntryAction) -> Result<EntryStatus, TimeAccountingError> {
        match (self, action) {
            (EntryStatus::InProgress, EntryAction::StartBreak) => Ok(EntryStatus::Break),
            (EntryStatus::Break, EntryAction::EndBreak) => Ok(EntryStatus::InProgress),
            (EntryStatus::InProgress | EntryStatus::Break, EntryAction::ClockOut) => {
                Ok(EntryStatus::Completed)
            }
            (from, action) => Err(TimeAccountingError::InvalidTransition {
                from: format!("{from:?}"),
                action: format!("{action:?}"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub employee_id: EmployeeId,
    pub assignment_id: Option<Uuid>,
    pub clock_in: DateTime<Utc>,
    pub clock_out: Option<DateTime<Utc>>,
    pub break_hours: Decimal,
    pub total_hours: Decimal,
    pub status: EntryStatus,
    pub approval_status: ApprovalStatus,
    pub approved_by: Option<UserId>,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_hours: Option<Decimal>,
    pub approved_rate: Option<Decimal>,
    pub total_pay: Option<Decimal>,
    pub admin_notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub total_calls_taken: u32,
    pub leads_generated: u32,
    pub shift_remarks: String,
    pub performance_rating: Option<u8>,
    pub version: i64,
}

impl TimeEntry {
    pub fn stream_id(&self) -> String {
        format!("TimeEntry-{}", self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakStatus {
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakLog {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub time_entry_id: Uuid,
    pub employee_id: EmployeeId,
    pub break_start: DateTime<Utc>,
    pub break_end: Option<DateTime<Utc>>,
    pub break_hours: Decimal,
    pub status: BreakStatus,
}
