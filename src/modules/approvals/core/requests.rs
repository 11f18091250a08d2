use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::approvals::core::state::{RequestStatus, Verdict};
use crate::shared::core::primitives::{EmployeeId, TenantId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    Annual,
    Sick,
    Personal,
    Unpaid,
    Other,
}

impl LeaveType {
    pub fn as_str(self) -> &'static str {
        match self {
            LeaveType::Annual => "annual",
            LeaveType::Sick => "sick",
            LeaveType::Personal => "personal",
            LeaveType::Unpaid => "unpaid",
            LeaveType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub employee_id: EmployeeId,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days_requested: u32,
    pub reason: String,
    pub status: RequestStatus,
    pub approved_by: Option<UserId>,
    pub decided_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LeaveRequest {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }

    pub fn stream_id(&self) -> String {
        format!("LeaveRequest-{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSwapRequest {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub requester_id: EmployeeId,
    pub target_id: EmployeeId,
    pub original_shift_id: Uuid,
    pub requested_shift_id: Uuid,
    pub reason: String,
    pub status: RequestStatus,
    pub approved_by: Option<UserId>,
    pub decided_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ShiftSwapRequest {
    pub fn stream_id(&self) -> String {
        format!("ShiftSwapRequest-{}", self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalEntity {
    Timesheet,
    LeaveRequest,
    SwapRequest,
}

/// Append-only audit row. The decided entity mirrors the latest row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalHistory {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub entity_type: ApprovalEntity,
    pub entity_id: Uuid,
    pub approver_id: UserId,
    pub status: String,
    pub notes: Option<String>,
    pub decided_at: DateTime<Utc>,
}

impl ApprovalHistory {
    pub fn record(
        tenant_id: TenantId,
        entity_type: ApprovalEntity,
        entity_id: Uuid,
        approver_id: UserId,
        status: &str,
        notes: Option<String>,
        decided_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            tenant_id,
            entity_type,
            entity_id,
            approver_id,
            status: status.to_string(),
            notes,
            decided_at,
        }
    }
}

/// Body of a leave or swap decision.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestDecision {
    pub action: Verdict,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}
