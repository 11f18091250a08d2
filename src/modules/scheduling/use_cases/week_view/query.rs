use serde::Deserialize;
use uuid::Uuid;

use crate::shared::core::primitives::EmployeeId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct WeekViewQuery {
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    #[serde(default)]
    pub rota_id: Option<Uuid>,
    #[serde(default)]
    pub published_only: bool,
    #[serde(default)]
    pub show_drafts_only: bool,
}
