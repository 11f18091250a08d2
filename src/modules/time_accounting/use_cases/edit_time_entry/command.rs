use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

/// Manual correction of a finished entry before it is approved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EditTimeEntry {
    #[serde(skip)]
    pub id: Uuid,
    #[serde(default)]
    pub clock_in: Option<DateTime<Utc>>,
    #[serde(default)]
    pub clock_out: Option<DateTime<Utc>>,
    #[serde(default)]
    pub break_hours: Option<Decimal>,
    #[serde(default)]
    pub shift_remarks: Option<String>,
}
