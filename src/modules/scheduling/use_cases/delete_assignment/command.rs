use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DeleteAssignment {
    pub id: Uuid,
}
