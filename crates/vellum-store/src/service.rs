//! Store operations shared by the HTTP handlers and embedding code
//!
//! Publishing is the only path that writes a live document. Restore reads an
//! immutable checkpoint and republishes it, so every guarantee publishing
//! makes (root validation, fresh update timestamp) holds for restores too.

use serde_json::json;

use crate::prelude::*;
use vellum_types::delta;
use vellum_types::types::Checkpoint;
use vellum_types::utils;

/// Message recorded for checkpoints created without one
pub const DEFAULT_CHECKPOINT_MESSAGE: &str = "Checkpoint";

/// Rejects documents whose root is not an object or array.
/// A scalar or null root cannot hold collections and is almost always a
/// client sending the wrong field, so it never reaches storage.
pub fn validate_document(document: &Document) -> ClResult<()> {
	if document.is_object() || document.is_array() {
		Ok(())
	} else {
		Err(Error::ValidationError("document root must be an object or array".into()))
	}
}

/// Reads the tenant's live document. Tenants that have never published
/// read as an empty object.
pub async fn read_live(app: &App, tn_id: &TnId) -> ClResult<Document> {
	let record = app.live_adapter.read_live(tn_id).await?;

	Ok(record.map_or_else(|| json!({}), |record| record.document))
}

/// Publishes a document as the tenant's live version.
/// Concurrent publishes resolve last-write-wins; the store never
/// interleaves fields from two documents.
pub async fn publish(app: &App, tn_id: &TnId, document: &Document) -> ClResult<Timestamp> {
	validate_document(document)?;

	let updated_at = app.live_adapter.update_live(tn_id, document).await?;

	Ok(updated_at)
}

/// Creates a checkpoint of `document`, tagged with its delta against the
/// tenant's current live document
pub async fn create_checkpoint(
	app: &App,
	tn_id: &TnId,
	message: Option<&str>,
	document: Document,
) -> ClResult<Checkpoint> {
	validate_document(&document)?;

	let live = read_live(app, tn_id).await?;
	let delta = delta::delta(&live, &document, &app.opts.collections);

	let checkpoint = Checkpoint {
		id: utils::random_id()?.into(),
		tn_id: tn_id.clone(),
		message: message.unwrap_or(DEFAULT_CHECKPOINT_MESSAGE).into(),
		document,
		delta,
		created_at: Timestamp::now(),
	};
	app.checkpoint_adapter.create_checkpoint(tn_id, &checkpoint).await?;

	if app.opts.max_checkpoints > 0 {
		let pruned =
			app.checkpoint_adapter.prune_checkpoints(tn_id, app.opts.max_checkpoints).await?;
		if pruned > 0 {
			debug!("Pruned {} old checkpoint(s) for tenant {}", pruned, tn_id);
		}
	}

	Ok(checkpoint)
}

/// Replaces the tenant's live document with a checkpointed one
pub async fn restore(app: &App, tn_id: &TnId, checkpoint_id: &str) -> ClResult<Timestamp> {
	let checkpoint = app.checkpoint_adapter.read_checkpoint(tn_id, checkpoint_id).await?;

	publish(app, tn_id, &checkpoint.document).await
}


// vim: ts=4
