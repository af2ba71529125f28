//! Role checks for protected operations
//!
//! Roles are flat strings carried in the auth context. The only role-gated
//! operation is publishing, which requires `admin`.

/// Role required to replace a tenant's live document
pub const ROLE_ADMIN: &str = "admin";

/// Checks whether a role list contains the given role
pub fn has_role(roles: &[Box<str>], role: &str) -> bool {
	roles.iter().any(|r| r.as_ref() == role)
}


// vim: ts=4
