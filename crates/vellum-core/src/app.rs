//! Application state shared by every handler and middleware layer

use std::sync::Arc;

use vellum_types::auth_adapter::AuthAdapter;
use vellum_types::checkpoint_adapter::CheckpointAdapter;
use vellum_types::delta::CollectionPath;
use vellum_types::live_adapter::LiveAdapter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// AppState //
//**********//
#[derive(Debug)]
pub struct AppState {
	pub opts: AppBuilderOpts,

	pub live_adapter: Arc<dyn LiveAdapter>,
	pub checkpoint_adapter: Arc<dyn CheckpointAdapter>,
	pub auth_adapter: Arc<dyn AuthAdapter>,
}

pub type App = Arc<AppState>;

// Adapters //
//**********//
/// Adapter slots filled by the embedding binary before the app is built
#[derive(Debug, Default)]
pub struct Adapters {
	pub live_adapter: Option<Arc<dyn LiveAdapter>>,
	pub checkpoint_adapter: Option<Arc<dyn CheckpointAdapter>>,
	pub auth_adapter: Option<Arc<dyn AuthAdapter>>,
}

// AppBuilderOpts //
//****************//
#[derive(Debug)]
pub struct AppBuilderOpts {
	/// Listen address, like "0.0.0.0:3000"
	pub listen: Box<str>,
	/// Collection paths counted by the delta calculator
	pub collections: Box<[CollectionPath]>,
	/// Checkpoints kept per tenant; older ones are pruned after create. 0 keeps all.
	pub max_checkpoints: u32,
	/// Skip the permissive CORS layer when fronted by a gateway that handles it
	pub disable_cors: bool,
}

impl Default for AppBuilderOpts {
	fn default() -> Self {
		Self {
			listen: "0.0.0.0:3000".into(),
			collections: Box::default(),
			max_checkpoints: 50,
			disable_cors: false,
		}
	}
}

// vim: ts=4
