//! Common test utilities and helpers
//!
//! Shared fixtures for the integration tests: a static token-table auth
//! adapter and app builders backed by the real storage adapters.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use vellum::app::{App, AppBuilderOpts, AppState};
use vellum::auth_adapter::{AuthAdapter, AuthCtx};
use vellum::delta::CollectionPath;
use vellum::error::{ClResult, Error};
use vellum::types::TnId;
use vellum_store_adapter_fs::StoreAdapterFs;
use vellum_store_adapter_sqlite::StoreAdapterSqlite;

/// Auth adapter resolving tokens from a fixed table
#[derive(Debug, Default)]
pub struct StaticAuthAdapter {
	tokens: HashMap<Box<str>, AuthCtx>,
}

impl StaticAuthAdapter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn token(mut self, token: &str, subject: &str, roles: &[&str]) -> Self {
		let ctx = AuthCtx {
			subject: subject.into(),
			roles: roles.iter().map(|role| Box::from(*role)).collect(),
		};
		self.tokens.insert(token.into(), ctx);
		self
	}
}

#[async_trait]
impl AuthAdapter for StaticAuthAdapter {
	async fn validate_access_token(&self, token: &str) -> ClResult<AuthCtx> {
		self.tokens.get(token).cloned().ok_or(Error::Unauthorized)
	}
}

pub fn admin_ctx() -> AuthCtx {
	AuthCtx { subject: "ops@example.com".into(), roles: ["admin".into()].into() }
}

pub fn editor_ctx() -> AuthCtx {
	AuthCtx { subject: "editor@example.com".into(), roles: Box::default() }
}

pub fn tn(s: &str) -> TnId {
	TnId::new(s).expect("valid tenant id")
}

pub fn collections(paths: &[&str]) -> Box<[CollectionPath]> {
	paths.iter().map(|path| path.parse().expect("valid collection path")).collect()
}

fn test_auth_adapter() -> Arc<StaticAuthAdapter> {
	Arc::new(
		StaticAuthAdapter::new()
			.token("admin-token", "ops@example.com", &["admin"])
			.token("editor-token", "editor@example.com", &[]),
	)
}

fn test_opts() -> AppBuilderOpts {
	AppBuilderOpts {
		collections: collections(&["services", "courses"]),
		..AppBuilderOpts::default()
	}
}

/// App backed by the SQLite adapter in a temp directory
pub async fn create_test_app() -> (App, TempDir) {
	create_test_app_opts(test_opts()).await
}

pub async fn create_test_app_opts(opts: AppBuilderOpts) -> (App, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = Arc::new(
		StoreAdapterSqlite::new(temp_dir.path().join("store.db"))
			.await
			.expect("Failed to create adapter"),
	);

	let app = Arc::new(AppState {
		opts,
		live_adapter: adapter.clone(),
		checkpoint_adapter: adapter,
		auth_adapter: test_auth_adapter(),
	});
	(app, temp_dir)
}

/// App backed by the filesystem adapter in a temp directory
pub async fn create_test_app_fs() -> (App, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = Arc::new(
		StoreAdapterFs::new(temp_dir.path().join("data").into())
			.await
			.expect("Failed to create adapter"),
	);

	let app = Arc::new(AppState {
		opts: test_opts(),
		live_adapter: adapter.clone(),
		checkpoint_adapter: adapter,
		auth_adapter: test_auth_adapter(),
	});
	(app, temp_dir)
}
