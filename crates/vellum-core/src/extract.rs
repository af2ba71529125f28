//! Custom extractors for Vellum-specific data

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::prelude::*;
use vellum_types::auth_adapter;

/// Header carrying the tenant namespace
pub const TENANT_HEADER: &str = "x-tenant-id";

// Tenant //
//********//
/// Tenant namespace taken from the `x-tenant-id` request header.
///
/// A missing header falls back to the `public` namespace. A malformed value
/// rejects the request before any handler runs.
#[derive(Clone, Debug)]
pub struct Tenant(pub TnId);

impl<S> FromRequestParts<S> for Tenant
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		match parts.headers.get(TENANT_HEADER) {
			None => Ok(Tenant(TnId::default())),
			Some(value) => {
				let value = value
					.to_str()
					.map_err(|_| Error::ValidationError("invalid tenant id header".into()))?;
				Ok(Tenant(TnId::new(value)?))
			}
		}
	}
}

// Auth //
//******//
/// Auth context stored by the token middleware.
///
/// Extracting it in a handler makes the route require authentication: when
/// the middleware stored no context the request is rejected with 401.
#[derive(Debug, Clone)]
pub struct Auth(pub auth_adapter::AuthCtx);

impl<S> FromRequestParts<S> for Auth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		if let Some(auth) = parts.extensions.get::<Auth>().cloned() {
			Ok(auth)
		} else {
			Err(Error::Unauthorized)
		}
	}
}


// vim: ts=4
