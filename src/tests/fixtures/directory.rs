use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::shared::core::directory::Employee;
use crate::shared::core::primitives::{AccessContext, LocationId, Role, TenantId};

pub struct EmployeeBuilder {
    inner: Employee,
}

impl Default for EmployeeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl EmployeeBuilder {
    pub fn new() -> Self {
        Self {
            inner: Employee {
                id: Uuid::now_v7(),
                tenant_id: Uuid::now_v7(),
                name: "Sam Carter".to_string(),
                location_id: None,
                role: Role::Employee,
                hourly_rate: dec!(15.00),
                is_active: true,
                is_online: false,
            },
        }
    }

    pub fn id(mut self, v: Uuid) -> Self {
        self.inner.id = v;
        self
    }

    pub fn tenant_id(mut self, v: TenantId) -> Self {
        self.inner.tenant_id = v;
        self
    }

    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.inner.name = v.into();
        self
    }

    pub fn location_id(mut self, v: LocationId) -> Self {
        self.inner.location_id = Some(v);
        self
    }

    pub fn role(mut self, v: Role) -> Self {
        self.inner.role = v;
        self
    }

    pub fn hourly_rate(mut self, v: Decimal) -> Self {
        self.inner.hourly_rate = v;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.inner.is_active = false;
        self
    }

    pub fn build(self) -> Employee {
        self.inner
    }
}

/// A caller of the given role with a fresh user id.
pub fn context_for(tenant_id: TenantId, role: Role, location_ids: Vec<LocationId>) -> AccessContext {
    AccessContext {
        user_id: Uuid::now_v7(),
        role,
        tenant_id,
        organization_id: Uuid::now_v7(),
        location_ids,
    }
}

/// The caller identity of a directory employee.
pub fn context_of(employee: &Employee) -> AccessContext {
    AccessContext {
        user_id: employee.id,
        role: employee.role,
        tenant_id: employee.tenant_id,
        organization_id: Uuid::now_v7(),
        location_ids: employee.location_id.into_iter().collect(),
    }
}
