use axum::{
	middleware,
	routing::{get, post, put},
	Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::prelude::*;
use crate::route_auth::optional_auth;
use crate::store::handler;

/// Builds the HTTP router.
///
/// Token validation runs on every route; whether a route requires the result
/// is decided by its handler extractors, so public and protected methods can
/// share a path.
pub fn init(app: App) -> Router {
	let router = Router::new()
		.route("/live", get(handler::get_live))
		.route("/publish", put(handler::put_publish))
		.route(
			"/checkpoints",
			get(handler::get_checkpoints)
				.post(handler::post_checkpoint)
				.delete(handler::delete_checkpoints),
		)
		.route("/checkpoints/{checkpoint_id}", get(handler::get_checkpoint))
		.route("/restore/{checkpoint_id}", post(handler::post_restore))
		.layer(middleware::from_fn_with_state(app.clone(), optional_auth))
		.layer(TraceLayer::new_for_http());

	let router = if app.opts.disable_cors { router } else { router.layer(CorsLayer::permissive()) };

	router.with_state(app)
}

// vim: ts=4
