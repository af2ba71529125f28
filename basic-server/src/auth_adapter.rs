//! Auth adapter validating HS256 bearer tokens signed with a shared secret.
//!
//! Token issuance belongs to the identity provider in front of the store;
//! this adapter only checks signatures and expiry and surfaces the caller's
//! roles from the `r` claim.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use vellum::auth_adapter::{AuthAdapter, AuthCtx};
use vellum::prelude::*;

#[derive(Clone, Debug, Deserialize, Serialize)]
struct AuthToken {
	sub: Box<str>,
	exp: u64,
	r: Option<Box<str>>,
}

pub struct JwtAuthAdapter {
	secret: Box<str>,
}

impl JwtAuthAdapter {
	pub fn new(secret: impl Into<Box<str>>) -> Self {
		Self { secret: secret.into() }
	}
}

impl std::fmt::Debug for JwtAuthAdapter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("JwtAuthAdapter").field("secret", &"<redacted>").finish()
	}
}

#[async_trait]
impl AuthAdapter for JwtAuthAdapter {
	async fn validate_access_token(&self, token: &str) -> ClResult<AuthCtx> {
		let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());

		let token_data = decode::<AuthToken>(
			token,
			&decoding_key,
			&Validation::new(Algorithm::HS256),
		)
		.map_err(|_| Error::Unauthorized)?;

		let roles = token_data
			.claims
			.r
			.as_deref()
			.unwrap_or("")
			.split(',')
			.filter(|r| !r.is_empty())
			.map(Box::from)
			.collect();

		Ok(AuthCtx { subject: token_data.claims.sub, roles })
	}
}


// vim: ts=4
