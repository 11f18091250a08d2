use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::scheduling::core::shape::ShapeRequest;
use crate::shared::core::primitives::EmployeeId;

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateAssignment {
    pub id: Uuid,
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(flatten)]
    pub shape: ShapeRequest,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub emergency_mode: bool,
}
