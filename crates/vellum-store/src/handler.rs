//! HTTP handlers for the store API

use axum::{
	extract::{Path, State},
	http::StatusCode,
	Json,
};
use serde::{Deserialize, Serialize};

use crate::prelude::*;
use crate::service;
use vellum_core::extract::{Auth, Tenant};
use vellum_core::roles::{has_role, ROLE_ADMIN};
use vellum_types::types::{Checkpoint, CheckpointSummary};

// Request / response shapes //
//***************************//

#[derive(Debug, Deserialize)]
pub struct PublishRequest {
	pub data: Document,
}

#[derive(Debug, Deserialize)]
pub struct CreateCheckpointRequest {
	pub message: Option<String>,
	pub data: Document,
}

#[derive(Debug, Serialize)]
pub struct PublishResponse {
	#[serde(rename = "updatedAt")]
	pub updated_at: Timestamp,
}

#[derive(Debug, Serialize)]
pub struct CheckpointListResponse {
	pub items: Vec<CheckpointSummary>,
}

// Handlers //
//**********//

/// GET /live - Current live document for the tenant.
/// A tenant that has never published reads as an empty object.
pub async fn get_live(State(app): State<App>, Tenant(tn_id): Tenant) -> ClResult<Json<Document>> {
	let document = service::read_live(&app, &tn_id).await?;

	Ok(Json(document))
}

/// PUT /publish - Replace the tenant's live document (admin only)
pub async fn put_publish(
	State(app): State<App>,
	Tenant(tn_id): Tenant,
	Auth(auth): Auth,
	Json(req): Json<PublishRequest>,
) -> ClResult<Json<PublishResponse>> {
	if !has_role(&auth.roles, ROLE_ADMIN) {
		return Err(Error::PermissionDenied);
	}

	let updated_at = service::publish(&app, &tn_id, &req.data).await?;
	info!("{} published live document for tenant {}", auth.subject, tn_id);

	Ok(Json(PublishResponse { updated_at }))
}

/// POST /checkpoints - Snapshot a document with an optional message
pub async fn post_checkpoint(
	State(app): State<App>,
	Tenant(tn_id): Tenant,
	Auth(auth): Auth,
	Json(req): Json<CreateCheckpointRequest>,
) -> ClResult<(StatusCode, Json<Checkpoint>)> {
	let checkpoint =
		service::create_checkpoint(&app, &tn_id, req.message.as_deref(), req.data).await?;
	info!("{} created checkpoint {} for tenant {}", auth.subject, checkpoint.id, tn_id);

	Ok((StatusCode::CREATED, Json(checkpoint)))
}

/// GET /checkpoints - Checkpoint summaries for the tenant, newest first
pub async fn get_checkpoints(
	State(app): State<App>,
	Tenant(tn_id): Tenant,
) -> ClResult<Json<CheckpointListResponse>> {
	let items = app.checkpoint_adapter.list_checkpoints(&tn_id).await?;

	Ok(Json(CheckpointListResponse { items }))
}

/// GET /checkpoints/{checkpoint_id} - Full checkpoint including its document.
/// Ids belonging to another tenant read as not found.
pub async fn get_checkpoint(
	State(app): State<App>,
	Tenant(tn_id): Tenant,
	Path(checkpoint_id): Path<String>,
) -> ClResult<Json<Checkpoint>> {
	let checkpoint = app.checkpoint_adapter.read_checkpoint(&tn_id, &checkpoint_id).await?;

	Ok(Json(checkpoint))
}

/// DELETE /checkpoints - Remove every checkpoint for the tenant. Live is untouched.
pub async fn delete_checkpoints(
	State(app): State<App>,
	Tenant(tn_id): Tenant,
	Auth(auth): Auth,
) -> ClResult<StatusCode> {
	app.checkpoint_adapter.delete_checkpoints(&tn_id).await?;
	info!("{} deleted all checkpoints for tenant {}", auth.subject, tn_id);

	Ok(StatusCode::NO_CONTENT)
}

/// POST /restore/{checkpoint_id} - Publish a checkpointed document as live
pub async fn post_restore(
	State(app): State<App>,
	Tenant(tn_id): Tenant,
	Auth(auth): Auth,
	Path(checkpoint_id): Path<String>,
) -> ClResult<Json<PublishResponse>> {
	let updated_at = service::restore(&app, &tn_id, &checkpoint_id).await?;
	info!("{} restored checkpoint {} for tenant {}", auth.subject, checkpoint_id, tn_id);

	Ok(Json(PublishResponse { updated_at }))
}

// vim: ts=4
