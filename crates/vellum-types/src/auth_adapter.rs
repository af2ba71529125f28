//! Adapter that validates caller credentials for mutating operations.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

/// Context struct for an authenticated caller
#[derive(Clone, Debug)]
pub struct AuthCtx {
	/// Stable identifier of the caller (token subject)
	pub subject: Box<str>,
	/// Roles granted to the caller
	pub roles: Box<[Box<str>]>,
}

/// A Vellum auth adapter
///
/// Token issuance, user management and role assignment live outside this
/// system. The store only needs presented bearer tokens checked and the
/// caller's roles surfaced; a rejected token maps to `Error::Unauthorized`.
#[async_trait]
pub trait AuthAdapter: Debug + Send + Sync {
	/// Validates a bearer token and returns the caller context
	async fn validate_access_token(&self, token: &str) -> ClResult<AuthCtx>;
}

// vim: ts=4
