use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::modules::approvals::core::state::ApprovalStatus;
use crate::modules::time_accounting::core::calculations::shift_totals;
use crate::modules::time_accounting::core::time_entry::{
    BreakLog, BreakStatus, EntryStatus, TimeEntry,
};
use crate::shared::core::primitives::{EmployeeId, TenantId};

/// 2024-06-10 at the given UTC wall-clock time.
pub fn june_10(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, hour, minute, 0).unwrap()
}

pub struct TimeEntryBuilder {
    inner: TimeEntry,
}

impl Default for TimeEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TimeEntryBuilder {
    /// An entry clocked in at 09:00 and still running.
    pub fn new() -> Self {
        Self {
            inner: TimeEntry {
                id: Uuid::now_v7(),
                tenant_id: Uuid::now_v7(),
                employee_id: Uuid::now_v7(),
                assignment_id: None,
                clock_in: june_10(9, 0),
                clock_out: None,
                break_hours: Decimal::ZERO,
                total_hours: Decimal::ZERO,
                status: EntryStatus::InProgress,
                approval_status: ApprovalStatus::Pending,
                approved_by: None,
                approved_at: None,
                approved_hours: None,
                approved_rate: None,
                total_pay: None,
                admin_notes: None,
                rejection_reason: None,
                total_calls_taken: 0,
                leads_generated: 0,
                shift_remarks: String::new(),
                performance_rating: None,
                version: 1,
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

    pub fn assignment_id(mut self, v: Uuid) -> Self {
        self.inner.assignment_id = Some(v);
        self
    }

    pub fn clock_in(mut self, v: DateTime<Utc>) -> Self {
        self.inner.clock_in = v;
        self
    }

    pub fn status(mut self, v: EntryStatus) -> Self {
        self.inner.status = v;
        self
    }

    pub fn break_hours(mut self, v: Decimal) -> Self {
        self.inner.break_hours = v;
        self
    }

    pub fn approval_status(mut self, v: ApprovalStatus) -> Self {
        self.inner.approval_status = v;
        self
    }

    /// Clock out at `clock_out` and compute totals from the recorded breaks.
    pub fn completed(mut self, clock_out: DateTime<Utc>) -> Self {
        let totals = shift_totals(self.inner.clock_in, clock_out, self.inner.break_hours);
        self.inner.clock_out = Some(clock_out);
        self.inner.total_hours = totals.total_hours;
        self.inner.status = EntryStatus::Completed;
        self
    }

    pub fn build(self) -> TimeEntry {
        self.inner
    }
}

/// An open break on `entry`.
pub fn open_break(entry: &TimeEntry, start: DateTime<Utc>) -> BreakLog {
    BreakLog {
        id: Uuid::now_v7(),
        tenant_id: entry.tenant_id,
        time_entry_id: entry.id,
        employee_id: entry.employee_id,
        break_start: start,
        break_end: None,
        break_hours: Decimal::ZERO,
        status: BreakStatus::Active,
    }
}
