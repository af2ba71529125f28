use std::{fmt::Debug, path::Path};

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};

use vellum::{
	checkpoint_adapter::CheckpointAdapter,
	live_adapter::LiveAdapter,
	prelude::*,
	types::{Checkpoint, CheckpointSummary, Document, LiveRecord},
};

mod checkpoint;
mod live;
mod schema;

pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

#[derive(Debug)]
pub struct StoreAdapterSqlite {
	db: SqlitePool,
}

impl StoreAdapterSqlite {
	pub async fn new(path: impl AsRef<Path>) -> ClResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(inspect)
			.or(Err(Error::StorageError))?;

		schema::init_db(&db).await.inspect_err(inspect).or(Err(Error::StorageError))?;

		Ok(Self { db })
	}
}

#[async_trait]
impl LiveAdapter for StoreAdapterSqlite {
	async fn read_live(&self, tn_id: &TnId) -> ClResult<Option<LiveRecord>> {
		live::read_live(&self.db, tn_id).await
	}

	async fn update_live(&self, tn_id: &TnId, document: &Document) -> ClResult<Timestamp> {
		live::update_live(&self.db, tn_id, document).await
	}
}

#[async_trait]
impl CheckpointAdapter for StoreAdapterSqlite {
	async fn create_checkpoint(&self, tn_id: &TnId, checkpoint: &Checkpoint) -> ClResult<()> {
		checkpoint::create_checkpoint(&self.db, tn_id, checkpoint).await
	}

	async fn list_checkpoints(&self, tn_id: &TnId) -> ClResult<Vec<CheckpointSummary>> {
		checkpoint::list_checkpoints(&self.db, tn_id).await
	}

	async fn read_checkpoint(&self, tn_id: &TnId, checkpoint_id: &str) -> ClResult<Checkpoint> {
		checkpoint::read_checkpoint(&self.db, tn_id, checkpoint_id).await
	}

	async fn delete_checkpoints(&self, tn_id: &TnId) -> ClResult<()> {
		checkpoint::delete_checkpoints(&self.db, tn_id).await
	}

	async fn prune_checkpoints(&self, tn_id: &TnId, keep: u32) -> ClResult<u32> {
		checkpoint::prune_checkpoints(&self.db, tn_id, keep).await
	}
}

// vim: ts=4
