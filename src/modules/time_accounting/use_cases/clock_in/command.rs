use serde::Deserialize;

use crate::shared::core::primitives::{AccessContext, EmployeeId};

/// Clock an employee in. Without `employee_id` the caller clocks themself in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ClockIn {
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
}

impl ClockIn {
    pub fn employee_for(&self, context: &AccessContext) -> EmployeeId {
        self.employee_id.unwrap_or(context.user_id)
    }
}
