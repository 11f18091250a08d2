use serde::Deserialize;
use uuid::Uuid;

/// A swap proposed by the caller: their `original_shift_id` for the
/// `requested_shift_id` held by `target_id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmitSwapRequest {
    pub original_shift_id: Uuid,
    pub requested_shift_id: Uuid,
    pub target_id: Uuid,
    #[serde(default)]
    pub reason: String,
}
