//! Adapter that stores the append-mostly checkpoint history of each tenant.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;
use crate::types::{Checkpoint, CheckpointSummary};

/// A Vellum checkpoint adapter
///
/// Checkpoints are immutable once created and ordered newest first by
/// creation stamp; implementations break equal stamps with a stable
/// storage-order tiebreak so the ordering is total.
///
/// All reads are tenant-scoped. An id that belongs to another tenant must be
/// indistinguishable from an unknown id (`Error::NotFound` for both), so a
/// guessed id leaks nothing across tenants.
#[async_trait]
pub trait CheckpointAdapter: Debug + Send + Sync {
	/// Persists a fully formed checkpoint (id, delta and stamp are assigned
	/// by the checkpoint service before this call)
	async fn create_checkpoint(&self, tn_id: &TnId, checkpoint: &Checkpoint) -> ClResult<()>;

	/// Lists checkpoint summaries, newest first, without document payloads
	async fn list_checkpoints(&self, tn_id: &TnId) -> ClResult<Vec<CheckpointSummary>>;

	/// Reads one checkpoint including its document
	async fn read_checkpoint(&self, tn_id: &TnId, checkpoint_id: &str) -> ClResult<Checkpoint>;

	/// Deletes every checkpoint of the tenant. Irreversible, does not touch live.
	async fn delete_checkpoints(&self, tn_id: &TnId) -> ClResult<()>;

	/// Drops the oldest checkpoints beyond `keep`, returns how many were removed
	async fn prune_checkpoints(&self, tn_id: &TnId, keep: u32) -> ClResult<u32>;
}

// vim: ts=4
