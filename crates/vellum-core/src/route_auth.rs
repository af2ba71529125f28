//! Bearer token middleware
//!
//! Applied to the whole router. It validates a presented token and stores the
//! resulting [`Auth`] context in request extensions; handlers that extract
//! [`Auth`] are thereby protected, handlers that don't stay public.

use axum::{
	body::Body,
	extract::State,
	http::{response::Response, Request},
	middleware::Next,
};

use crate::app::App;
use crate::extract::Auth;
use crate::prelude::*;

fn bearer_token(req: &Request<Body>) -> Option<&str> {
	req.headers()
		.get("Authorization")
		.and_then(|h| h.to_str().ok())
		.and_then(|h| h.strip_prefix("Bearer "))
}

/// Stores the auth context when a valid bearer token is present, passes
/// the request through untouched otherwise
pub async fn optional_auth(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> ClResult<Response<Body>> {
	if let Some(token) = bearer_token(&req) {
		match app.auth_adapter.validate_access_token(token).await {
			Ok(ctx) => {
				req.extensions_mut().insert(Auth(ctx));
			}
			Err(err) => debug!("Rejected bearer token: {}", err),
		}
	}

	Ok(next.run(req).await)
}


// vim: ts=4
