use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BulkApproveTimesheets {
    pub entry_ids: Vec<Uuid>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BulkApproval {
    pub approved_count: usize,
    pub total_requested: usize,
}
