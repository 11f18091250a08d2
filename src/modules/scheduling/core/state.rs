// Lifecycle of assignments and rotas as explicit transition tables.
// Any (state, action) pair not listed is rejected with `InvalidTransition`.

use serde::{Deserialize, Serialize};

use crate::modules::scheduling::core::errors::SchedulingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Draft,
    Published,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentAction {
    Publish,
    Edit,
    Cancel,
    Delete { rota: Option<RotaStatus> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentTransition {
    To(AssignmentStatus),
    Removed,
}

impl AssignmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentStatus::Draft => "draft",
            AssignmentStatus::Published => "published",
            AssignmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn apply(self, action: AssignmentAction) -> Result<AssignmentTransition, SchedulingError> {
        use AssignmentAction as A;
        use AssignmentStatus as S;
        use AssignmentTransition::{Removed, To};

        match (self, action) {
            (S::Draft, A::Publish) => Ok(To(S::Published)),
            // Edits stay allowed on live shifts; the caller only changes how
            // loudly the employee is told.
            (S::Draft | S::Published, A::Edit) => Ok(To(self)),
            (S::Draft | S::Published, A::Cancel) => Ok(To(S::Cancelled)),
            (_, A::Delete {
                rota: Some(RotaStatus::Published),
            }) => Err(SchedulingError::RotaPublished),
            (_, A::Delete { .. }) => Ok(Removed),
            (from, action) => Err(SchedulingError::InvalidTransition {
                from: format!("{from:?}"),
                action: format!("{action:?}"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotaStatus {
    Draft,
    Published,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotaAction {
    Publish,
    Revert,
}

impl RotaStatus {
    pub fn apply(self, action: RotaAction) -> Result<RotaStatus, SchedulingError> {
        match (self, action) {
            (RotaStatus::Draft, RotaAction::Publish) => Ok(RotaStatus::Published),
            (RotaStatus::Published, RotaAction::Revert) => Ok(RotaStatus::Draft),
            (from, action) => Err(SchedulingError::InvalidTransition {
                from: format!("{from:?}"),
                action: format!("{action:?}"),
            }),
        }
    }
}
