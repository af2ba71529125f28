//! Adapter that stores the single live document of each tenant.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;
use crate::types::{Document, LiveRecord};

/// A Vellum live document adapter
///
/// Every `LiveAdapter` implementation holds exactly one current document per
/// tenant. `update_live` must be atomic: a concurrent reader sees either the
/// previous or the new document in full, never a partial write. Concurrent
/// updates for the same tenant race and the last completed write wins; the
/// adapter provides no merging and no locking.
///
/// The publish pipeline is the only caller of `update_live`.
#[async_trait]
pub trait LiveAdapter: Debug + Send + Sync {
	/// Reads the live record of a tenant, `None` if it has never published
	async fn read_live(&self, tn_id: &TnId) -> ClResult<Option<LiveRecord>>;

	/// Atomically replaces the live document, returns the new update stamp
	async fn update_live(&self, tn_id: &TnId, document: &Document) -> ClResult<Timestamp>;
}

// vim: ts=4
