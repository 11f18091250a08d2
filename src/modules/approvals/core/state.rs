// Approval lifecycles. Every request starts pending and is decided exactly
// once; decided states are terminal.

use serde::{Deserialize, Serialize};

use crate::modules::approvals::core::errors::ApprovalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approve,
    Reject,
    Edit,
}

/// The rejection reason a verdict carries. Rejections must give one.
pub fn rejection_reason(
    verdict: Verdict,
    reason: Option<&str>,
) -> Result<Option<String>, ApprovalError> {
    if verdict != Verdict::Reject {
        return Ok(None);
    }
    match reason.map(str::trim).filter(|reason| !reason.is_empty()) {
        Some(reason) => Ok(Some(reason.to_string())),
        None => Err(ApprovalError::invalid(
            "rejection_reason",
            "a reason is required when rejecting",
        )),
    }
}

/// Timesheet approval. `Edited` is an approval with corrected figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    Edited,
}

impl ApprovalStatus {
    pub fn decide(self, verdict: Verdict) -> Result<ApprovalStatus, ApprovalError> {
        match (self, verdict) {
            (ApprovalStatus::Pending, Verdict::Approve) => Ok(ApprovalStatus::Approved),
            (ApprovalStatus::Pending, Verdict::Reject) => Ok(ApprovalStatus::Rejected),
            (ApprovalStatus::Pending, Verdict::Edit) => Ok(ApprovalStatus::Edited),
            (from, _) => Err(ApprovalError::NotPending(format!("{from:?}"))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
            ApprovalStatus::Edited => "edited",
        }
    }
}

/// Leave and swap requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn decide(self, verdict: Verdict) -> Result<RequestStatus, ApprovalError> {
        match (self, verdict) {
            (RequestStatus::Pending, Verdict::Approve) => Ok(RequestStatus::Approved),
            (RequestStatus::Pending, Verdict::Reject) => Ok(RequestStatus::Rejected),
            (RequestStatus::Pending, Verdict::Edit) => Err(ApprovalError::UnsupportedVerdict),
            (from, _) => Err(ApprovalError::NotPending(format!("{from:?}"))),
        }
    }

    /// Pending and approved requests block overlapping submissions.
    pub fn holds_dates(self) -> bool {
        matches!(self, RequestStatus::Pending | RequestStatus::Approved)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }
}
