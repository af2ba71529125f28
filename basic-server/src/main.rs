//! Ready-to-run Vellum server wiring the bundled adapters from environment
//! variables. Intended as a deployment starting point; embedders with their
//! own adapters should depend on the `vellum` crate directly instead.

use std::{env, path, sync::Arc};

use vellum::delta::CollectionPath;
use vellum::prelude::*;
use vellum::AppBuilder;
use vellum_store_adapter_fs::StoreAdapterFs;
use vellum_store_adapter_sqlite::StoreAdapterSqlite;

mod auth_adapter;

use auth_adapter::JwtAuthAdapter;

pub struct Config {
	pub listen: String,
	pub data_dir: path::PathBuf,
	pub backend: String,
	pub api_secret: String,
	pub collections: Box<[CollectionPath]>,
	pub max_checkpoints: u32,
}

impl Config {
	fn from_env() -> ClResult<Self> {
		let api_secret = env::var("API_SECRET").map_err(|_| {
			error!("FATAL: API_SECRET is not set");
			Error::Internal("API_SECRET is not set".to_string())
		})?;

		let collections = env::var("DELTA_COLLECTIONS")
			.unwrap_or_default()
			.split(',')
			.filter(|p| !p.is_empty())
			.map(str::parse)
			.collect::<ClResult<Box<[CollectionPath]>>>()?;

		let max_checkpoints = match env::var("MAX_CHECKPOINTS") {
			Ok(v) => v
				.parse()
				.map_err(|_| Error::Internal(format!("Invalid MAX_CHECKPOINTS: {}", v)))?,
			Err(_) => 50,
		};

		Ok(Config {
			listen: env::var("LISTEN").unwrap_or("0.0.0.0:3000".to_string()),
			data_dir: path::PathBuf::from(env::var("DATA_DIR").unwrap_or("./data".to_string())),
			backend: env::var("STORE_BACKEND").unwrap_or("sqlite".to_string()),
			api_secret,
			collections,
			max_checkpoints,
		})
	}
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ClResult<()> {
	let mut builder = AppBuilder::new();
	let config = Config::from_env()?;

	tokio::fs::create_dir_all(&config.data_dir).await?;

	builder
		.listen(config.listen)
		.collections(config.collections)
		.max_checkpoints(config.max_checkpoints)
		.auth_adapter(Arc::new(JwtAuthAdapter::new(config.api_secret)));

	match config.backend.as_str() {
		"sqlite" => {
			let store = Arc::new(StoreAdapterSqlite::new(config.data_dir.join("store.db")).await?);
			builder.live_adapter(store.clone()).checkpoint_adapter(store);
		}
		"fs" => {
			let store = Arc::new(StoreAdapterFs::new(config.data_dir.join("store").into()).await?);
			builder.live_adapter(store.clone()).checkpoint_adapter(store);
		}
		other => {
			error!("FATAL: Unknown STORE_BACKEND: {}", other);
			return Err(Error::Internal(format!("Unknown STORE_BACKEND: {}", other)));
		}
	}

	builder.run().await
}

// vim: ts=4
