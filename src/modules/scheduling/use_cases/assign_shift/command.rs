use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::scheduling::core::shape::ShapeRequest;
use crate::shared::core::primitives::EmployeeId;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssignShift {
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub shape: ShapeRequest,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub rota_id: Option<Uuid>,
}
