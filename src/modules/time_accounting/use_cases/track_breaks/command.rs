use serde::Deserialize;

use crate::shared::core::primitives::{AccessContext, EmployeeId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct StartBreak {
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct EndBreak {
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
}

impl StartBreak {
    pub fn employee_for(&self, context: &AccessContext) -> EmployeeId {
        self.employee_id.unwrap_or(context.user_id)
    }
}

impl EndBreak {
    pub fn employee_for(&self, context: &AccessContext) -> EmployeeId {
        self.employee_id.unwrap_or(context.user_id)
    }
}
