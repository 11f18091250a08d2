// Directory rows owned by the surrounding platform (employee and tenant CRUD).
// The engine reads them and flips the presence flag, nothing else.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::shared::core::primitives::{EmployeeId, LocationId, Role, TenantId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub tenant_id: TenantId,
    pub name: String,
    pub location_id: Option<LocationId>,
    pub role: Role,
    pub hourly_rate: Decimal,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_online: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantSettings {
    pub tenant_id: TenantId,
    #[serde(default)]
    pub allow_manager_approvals: bool,
    #[serde(default = "default_max_break_hours")]
    pub max_break_hours: Decimal,
}

impl TenantSettings {
    pub fn defaults_for(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            allow_manager_approvals: false,
            max_break_hours: default_max_break_hours(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_break_hours() -> Decimal {
    dec!(1.00)
}

#[cfg(test)]
mod directory_tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn it_should_fill_defaults_when_deserializing_settings() {
        let tenant_id = Uuid::now_v7();
        let settings: TenantSettings =
            serde_json::from_value(serde_json::json!({ "tenant_id": tenant_id })).unwrap();
        assert_eq!(settings, TenantSettings::defaults_for(tenant_id));
    }

    #[rstest]
    fn it_should_default_employees_to_active_and_offline() {
        let employee: Employee = serde_json::from_value(serde_json::json!({
            "id": Uuid::now_v7(),
            "tenant_id": Uuid::now_v7(),
            "name": "Ada",
            "location_id": null,
            "role": "employee",
            "hourly_rate": 15.5
        }))
        .unwrap();
        assert!(employee.is_active);
        assert!(!employee.is_online);
        assert_eq!(employee.hourly_rate, dec!(15.5));
    }
}
