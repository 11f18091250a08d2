// Role and location-scope rules shared by every use case.
//
// Admins act on anything inside their tenant. Managers act on employees whose
// location is in their assigned set. Employees act only on themselves.
// Tenant isolation is enforced earlier, by the tenant-scoped repository reads.

use thiserror::Error;

use crate::shared::core::directory::{Employee, TenantSettings};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{AccessContext, Role};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("role {0:?} may not perform this action")]
    RoleDenied(Role),

    #[error("employee is outside the caller's locations")]
    OutsideLocationScope,

    #[error("manager approvals are disabled for this tenant")]
    ManagerApprovalsDisabled,
}

impl From<AccessError> for ApplicationError {
    fn from(error: AccessError) -> Self {
        ApplicationError::Forbidden(error.to_string())
    }
}

/// Whether the employee is visible to the caller in read models.
pub fn in_scope(context: &AccessContext, employee: &Employee) -> bool {
    match context.role {
        Role::Admin => true,
        Role::Manager => employee
            .location_id
            .is_some_and(|location| context.location_ids.contains(&location)),
        Role::Employee => employee.id == context.user_id,
    }
}

/// Creating, editing and publishing shifts.
pub fn ensure_can_schedule(context: &AccessContext, employee: &Employee) -> Result<(), AccessError> {
    match context.role {
        Role::Admin => Ok(()),
        Role::Manager if in_scope(context, employee) => Ok(()),
        Role::Manager => Err(AccessError::OutsideLocationScope),
        Role::Employee => Err(AccessError::RoleDenied(Role::Employee)),
    }
}

pub fn ensure_can_manage_tenant(context: &AccessContext) -> Result<(), AccessError> {
    match context.role {
        Role::Admin | Role::Manager => Ok(()),
        Role::Employee => Err(AccessError::RoleDenied(Role::Employee)),
    }
}

/// Clocking and submitting requests: the employee themself, or someone who
/// may schedule them.
pub fn ensure_can_act_for(context: &AccessContext, employee: &Employee) -> Result<(), AccessError> {
    if context.user_id == employee.id {
        return Ok(());
    }
    ensure_can_schedule(context, employee)
}

/// Approval decisions on timesheets, leave and swaps.
pub fn ensure_can_decide(
    context: &AccessContext,
    settings: &TenantSettings,
    employee: &Employee,
) -> Result<(), AccessError> {
    match context.role {
        Role::Admin => Ok(()),
        Role::Manager if !settings.allow_manager_approvals => {
            Err(AccessError::ManagerApprovalsDisabled)
        }
        Role::Manager if in_scope(context, employee) => Ok(()),
        Role::Manager => Err(AccessError::OutsideLocationScope),
        Role::Employee => Err(AccessError::RoleDenied(Role::Employee)),
    }
}
