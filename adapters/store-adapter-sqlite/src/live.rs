//! Live document storage
//!
//! One row per tenant. The upsert is a single statement and SQLite
//! serializes writers, so a reader never observes a torn document and
//! concurrent publishes resolve to the last completed write.

use sqlx::{Row, SqlitePool};

use crate::inspect;
use vellum::prelude::*;
use vellum::types::{Document, LiveRecord};

pub(crate) async fn read_live(db: &SqlitePool, tn_id: &TnId) -> ClResult<Option<LiveRecord>> {
	let res = sqlx::query("SELECT document, updated_at FROM live_documents WHERE tn_id = ?1")
		.bind(tn_id.as_str())
		.fetch_one(db)
		.await;

	match res {
		Ok(row) => {
			let raw: &str =
				row.try_get("document").inspect_err(inspect).or(Err(Error::StorageError))?;
			let updated_at: i64 =
				row.try_get("updated_at").inspect_err(inspect).or(Err(Error::StorageError))?;

			Ok(Some(LiveRecord {
				tn_id: tn_id.clone(),
				document: serde_json::from_str(raw).or(Err(Error::StorageError))?,
				updated_at: Timestamp(updated_at),
			}))
		}
		Err(sqlx::Error::RowNotFound) => Ok(None),
		Err(err) => {
			inspect(&err);
			Err(Error::StorageError)
		}
	}
}

pub(crate) async fn update_live(
	db: &SqlitePool,
	tn_id: &TnId,
	document: &Document,
) -> ClResult<Timestamp> {
	let updated_at = Timestamp::now();

	sqlx::query(
		"INSERT INTO live_documents (tn_id, document, updated_at) VALUES (?1, ?2, ?3)
		ON CONFLICT(tn_id) DO UPDATE SET document = ?2, updated_at = ?3",
	)
	.bind(tn_id.as_str())
	.bind(serde_json::to_string(document)?)
	.bind(updated_at.0)
	.execute(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::StorageError))?;

	Ok(updated_at)
}

// vim: ts=4
