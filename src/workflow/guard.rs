//! Role and status gates
//!
//! The one authorization check consumed by every gated operation. These run
//! before any network I/O as a UX courtesy only; the server re-enforces all
//! of them and stays authoritative.

use crate::client::models::{KycStatus, Role, User};
use crate::core::error::{PortalError, Result};

/// Require an exact role
pub fn require_role(user: &User, role: Role) -> Result<()> {
    if user.role == role {
        Ok(())
    } else {
        Err(PortalError::PermissionDenied(format!(
            "{} access required, current role is {}",
            role, user.role
        )))
    }
}

/// Require admin-level access. Super admins satisfy admin checks, matching
/// how the admin dashboard is shared between the two roles.
pub fn require_admin(user: &User) -> Result<()> {
    if user.role.is_admin() {
        Ok(())
    } else {
        Err(PortalError::PermissionDenied(format!(
            "admin access required, current role is {}",
            user.role
        )))
    }
}

/// Require the super-admin role (admin roster management)
pub fn require_super_admin(user: &User) -> Result<()> {
    require_role(user, Role::SuperAdmin)
}

/// Require a verified KYC status. Precondition for loan applications.
pub fn require_verified(user: &User) -> Result<()> {
    match user.status {
        KycStatus::Verified => Ok(()),
        status => Err(PortalError::VerificationRequired(format!(
            "account status is '{}', you must be verified to apply for a loan",
            status
        ))),
    }
}
