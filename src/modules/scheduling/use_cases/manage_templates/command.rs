use chrono::NaiveTime;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTemplate {
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub required_staff: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeactivateTemplate {
    pub id: Uuid,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ListTemplates {
    #[serde(default)]
    pub include_inactive: bool,
}
