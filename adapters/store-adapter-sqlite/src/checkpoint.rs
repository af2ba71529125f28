//! Checkpoint storage
//!
//! Rows are append-only; nothing updates a checkpoint after insert. Every
//! query carries the tn_id predicate, so a guessed id from another tenant
//! reads as missing rather than forbidden.

use sqlx::{Row, SqlitePool};

use crate::inspect;
use vellum::prelude::*;
use vellum::types::{Checkpoint, CheckpointSummary};

pub(crate) async fn create_checkpoint(
	db: &SqlitePool,
	tn_id: &TnId,
	checkpoint: &Checkpoint,
) -> ClResult<()> {
	sqlx::query(
		"INSERT INTO checkpoints (checkpoint_id, tn_id, message, document, delta, created_at)
		VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
	)
	.bind(checkpoint.id.as_ref())
	.bind(tn_id.as_str())
	.bind(checkpoint.message.as_ref())
	.bind(serde_json::to_string(&checkpoint.document)?)
	.bind(serde_json::to_string(&checkpoint.delta)?)
	.bind(checkpoint.created_at.0)
	.execute(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::StorageError))?;

	Ok(())
}

pub(crate) async fn list_checkpoints(
	db: &SqlitePool,
	tn_id: &TnId,
) -> ClResult<Vec<CheckpointSummary>> {
	let rows = sqlx::query(
		"SELECT checkpoint_id, message, delta, created_at FROM checkpoints
		WHERE tn_id = ?1 ORDER BY created_at DESC, rowid DESC",
	)
	.bind(tn_id.as_str())
	.fetch_all(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::StorageError))?;

	let mut items = Vec::with_capacity(rows.len());
	for row in rows {
		let id: String =
			row.try_get("checkpoint_id").inspect_err(inspect).or(Err(Error::StorageError))?;
		let message: String =
			row.try_get("message").inspect_err(inspect).or(Err(Error::StorageError))?;
		let delta_raw: &str =
			row.try_get("delta").inspect_err(inspect).or(Err(Error::StorageError))?;
		let created_at: i64 =
			row.try_get("created_at").inspect_err(inspect).or(Err(Error::StorageError))?;

		items.push(CheckpointSummary {
			id: id.into(),
			message: message.into(),
			delta: serde_json::from_str(delta_raw).or(Err(Error::StorageError))?,
			created_at: Timestamp(created_at),
		});
	}

	Ok(items)
}

pub(crate) async fn read_checkpoint(
	db: &SqlitePool,
	tn_id: &TnId,
	checkpoint_id: &str,
) -> ClResult<Checkpoint> {
	let res = sqlx::query(
		"SELECT message, document, delta, created_at FROM checkpoints
		WHERE tn_id = ?1 AND checkpoint_id = ?2",
	)
	.bind(tn_id.as_str())
	.bind(checkpoint_id)
	.fetch_one(db)
	.await;

	match res {
		Ok(row) => {
			let message: String =
				row.try_get("message").inspect_err(inspect).or(Err(Error::StorageError))?;
			let document_raw: &str =
				row.try_get("document").inspect_err(inspect).or(Err(Error::StorageError))?;
			let delta_raw: &str =
				row.try_get("delta").inspect_err(inspect).or(Err(Error::StorageError))?;
			let created_at: i64 =
				row.try_get("created_at").inspect_err(inspect).or(Err(Error::StorageError))?;

			Ok(Checkpoint {
				id: checkpoint_id.into(),
				tn_id: tn_id.clone(),
				message: message.into(),
				document: serde_json::from_str(document_raw).or(Err(Error::StorageError))?,
				delta: serde_json::from_str(delta_raw).or(Err(Error::StorageError))?,
				created_at: Timestamp(created_at),
			})
		}
		Err(sqlx::Error::RowNotFound) => Err(Error::NotFound),
		Err(err) => {
			inspect(&err);
			Err(Error::StorageError)
		}
	}
}

pub(crate) async fn delete_checkpoints(db: &SqlitePool, tn_id: &TnId) -> ClResult<()> {
	sqlx::query("DELETE FROM checkpoints WHERE tn_id = ?1")
		.bind(tn_id.as_str())
		.execute(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::StorageError))?;

	Ok(())
}

pub(crate) async fn prune_checkpoints(db: &SqlitePool, tn_id: &TnId, keep: u32) -> ClResult<u32> {
	let res = sqlx::query(
		"DELETE FROM checkpoints WHERE tn_id = ?1 AND rowid NOT IN (
			SELECT rowid FROM checkpoints WHERE tn_id = ?1
			ORDER BY created_at DESC, rowid DESC LIMIT ?2
		)",
	)
	.bind(tn_id.as_str())
	.bind(keep)
	.execute(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::StorageError))?;

	Ok(res.rows_affected() as u32)
}

// vim: ts=4
