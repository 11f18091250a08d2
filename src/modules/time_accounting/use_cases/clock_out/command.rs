use serde::Deserialize;

use crate::shared::core::primitives::{AccessContext, EmployeeId};

/// End-of-shift report filed with the clock-out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClockOut {
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    #[serde(default)]
    pub total_calls_taken: Option<u32>,
    #[serde(default)]
    pub leads_generated: Option<u32>,
    #[serde(default)]
    pub shift_remarks: Option<String>,
    #[serde(default)]
    pub performance_rating: Option<u8>,
}

impl ClockOut {
    pub fn employee_for(&self, context: &AccessContext) -> EmployeeId {
        self.employee_id.unwrap_or(context.user_id)
    }
}
