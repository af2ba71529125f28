//! App builder - constructs and runs the Vellum application

use std::sync::Arc;

use crate::auth_adapter::AuthAdapter;
use crate::checkpoint_adapter::CheckpointAdapter;
use crate::delta::CollectionPath;
use crate::live_adapter::LiveAdapter;
use crate::prelude::*;
use crate::routes;
pub use vellum_core::app::{Adapters, App, AppBuilderOpts, AppState, VERSION};

pub struct AppBuilder {
	opts: AppBuilderOpts,
	adapters: Adapters,
}

impl AppBuilder {
	pub fn new() -> Self {
		tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.init();
		AppBuilder { opts: AppBuilderOpts::default(), adapters: Adapters::default() }
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}
	pub fn collections(
		&mut self,
		collections: impl IntoIterator<Item = CollectionPath>,
	) -> &mut Self {
		self.opts.collections = collections.into_iter().collect();
		self
	}
	pub fn max_checkpoints(&mut self, max_checkpoints: u32) -> &mut Self {
		self.opts.max_checkpoints = max_checkpoints;
		self
	}
	pub fn disable_cors(&mut self, disable: bool) -> &mut Self {
		self.opts.disable_cors = disable;
		self
	}

	// Adapters
	pub fn live_adapter(&mut self, live_adapter: Arc<dyn LiveAdapter>) -> &mut Self {
		self.adapters.live_adapter = Some(live_adapter);
		self
	}
	pub fn checkpoint_adapter(
		&mut self,
		checkpoint_adapter: Arc<dyn CheckpointAdapter>,
	) -> &mut Self {
		self.adapters.checkpoint_adapter = Some(checkpoint_adapter);
		self
	}
	pub fn auth_adapter(&mut self, auth_adapter: Arc<dyn AuthAdapter>) -> &mut Self {
		self.adapters.auth_adapter = Some(auth_adapter);
		self
	}

	pub async fn run(self) -> ClResult<()> {
		info!("Vellum store V{}", VERSION);

		let Some(live_adapter) = self.adapters.live_adapter else {
			error!("FATAL: No live adapter configured");
			return Err(Error::Internal("No live adapter configured".to_string()));
		};
		let Some(checkpoint_adapter) = self.adapters.checkpoint_adapter else {
			error!("FATAL: No checkpoint adapter configured");
			return Err(Error::Internal("No checkpoint adapter configured".to_string()));
		};
		let Some(auth_adapter) = self.adapters.auth_adapter else {
			error!("FATAL: No auth adapter configured");
			return Err(Error::Internal("No auth adapter configured".to_string()));
		};

		let app: App =
			Arc::new(AppState { opts: self.opts, live_adapter, checkpoint_adapter, auth_adapter });

		if app.opts.collections.is_empty() {
			warn!("No delta collections configured, checkpoint deltas will be empty");
		}

		let router = routes::init(app.clone());

		let listener = tokio::net::TcpListener::bind(app.opts.listen.as_ref()).await?;
		info!("Listening on {}", app.opts.listen);
		axum::serve(listener, router).await?;

		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
