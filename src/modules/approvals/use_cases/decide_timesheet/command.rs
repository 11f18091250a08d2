use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::approvals::core::state::Verdict;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DecideTimesheet {
    #[serde(skip)]
    pub id: Uuid,
    pub action: Verdict,
    #[serde(default)]
    pub approved_hours: Option<Decimal>,
    #[serde(default)]
    pub approved_rate: Option<Decimal>,
    #[serde(default)]
    pub admin_notes: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub clock_in: Option<DateTime<Utc>>,
    #[serde(default)]
    pub clock_out: Option<DateTime<Utc>>,
    #[serde(default)]
    pub break_hours: Option<Decimal>,
}

impl DecideTimesheet {
    /// Plain approval at the recorded hours and the employee's rate.
    pub fn approve(id: Uuid, admin_notes: Option<String>) -> Self {
        Self {
            id,
            action: Verdict::Approve,
            approved_hours: None,
            approved_rate: None,
            admin_notes,
            rejection_reason: None,
            clock_in: None,
            clock_out: None,
            break_hours: None,
        }
    }
}
