//! Database schema initialization

use sqlx::SqlitePool;

/// Initialize the database schema with all required tables and indexes
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Live documents
	//****************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS live_documents (
		tn_id text NOT NULL,
		document json NOT NULL,
		updated_at integer NOT NULL,
		PRIMARY KEY(tn_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Checkpoints
	//*************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS checkpoints (
		checkpoint_id text NOT NULL,
		tn_id text NOT NULL,
		message text NOT NULL,
		document json NOT NULL,
		delta json NOT NULL,
		created_at integer NOT NULL,
		PRIMARY KEY(checkpoint_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_checkpoints_tnid_created
		ON checkpoints(tn_id, created_at)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
