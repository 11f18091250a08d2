use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::modules::approvals::core::requests::{LeaveRequest, LeaveType, ShiftSwapRequest};
use crate::modules::approvals::core::state::RequestStatus;
use crate::modules::scheduling::core::shift::ShiftAssignment;
use crate::shared::core::primitives::{EmployeeId, TenantId};

pub struct LeaveRequestBuilder {
    inner: LeaveRequest,
}

impl Default for LeaveRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl LeaveRequestBuilder {
    pub fn new() -> Self {
        Self {
            inner: LeaveRequest {
                id: Uuid::now_v7(),
                tenant_id: Uuid::now_v7(),
                employee_id: Uuid::now_v7(),
                leave_type: LeaveType::Annual,
                start_date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
                days_requested: 5,
                reason: "Family holiday".to_string(),
                status: RequestStatus::Pending,
                approved_by: None,
                decided_at: None,
                rejection_reason: None,
                notes: None,
                created_at: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
            },
        }
    }

    pub fn tenant_id(mut self, v: TenantId) -> Self {
        self.inner.tenant_id = v;
        self
    }

    pub fn employee_id(mut self, v: EmployeeId) -> Self {
        self.inner.employee_id = v;
        self
    }

    pub fn dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.inner.start_date = start;
        self.inner.end_date = end;
        self.inner.days_requested = ((end - start).num_days() + 1) as u32;
        self
    }

    pub fn status(mut self, v: RequestStatus) -> Self {
        self.inner.status = v;
        self
    }

    pub fn build(self) -> LeaveRequest {
        self.inner
    }
}

pub struct SwapRequestBuilder {
    inner: ShiftSwapRequest,
}

#[allow(dead_code)]
impl SwapRequestBuilder {
    /// A pending swap of `original` (held by the requester) for `requested`.
    pub fn between(original: &ShiftAssignment, requested: &ShiftAssignment) -> Self {
        Self {
            inner: ShiftSwapRequest {
                id: Uuid::now_v7(),
                tenant_id: original.tenant_id,
                requester_id: original.employee_id,
                target_id: requested.employee_id,
                original_shift_id: original.id,
                requested_shift_id: requested.id,
                reason: "Doctor appointment".to_string(),
                status: RequestStatus::Pending,
                approved_by: None,
                decided_at: None,
                rejection_reason: None,
                created_at: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
            },
        }
    }

    pub fn status(mut self, v: RequestStatus) -> Self {
        self.inner.status = v;
        self
    }

    pub fn build(self) -> ShiftSwapRequest {
        self.inner
    }
}
