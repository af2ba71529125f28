//! Working copy state machine
//!
//! Tracks the document an operator is editing: `Clean` while it matches the
//! last known live document, `Dirty` once edited. Every transition mirrors
//! the document into a [`SessionCache`] slot so a restarted client can
//! resume the working copy without replaying the undo history.
//!
//! Cache failures are logged and swallowed; the cache exists for reload
//! resilience, not correctness.

use std::collections::VecDeque;
use std::sync::Arc;

use serde_json::json;

use crate::cache::SessionCache;
use crate::prelude::*;

/// Undo depth bound. Pushing past it silently drops the oldest entry.
pub const UNDO_CAPACITY: usize = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
	#[default]
	Clean,
	Dirty,
}

// WorkingCopy //
//*************//
/// In-progress edit session for one tenant's document
#[derive(Debug)]
pub struct WorkingCopy {
	tn_id: TnId,
	document: Document,
	/// Last known live document, the `Clean` baseline
	live: Document,
	/// Prior documents, most recent first
	undo_stack: VecDeque<Document>,
	state: SessionState,
	cache: Arc<dyn SessionCache>,
}

impl WorkingCopy {
	pub fn new(tn_id: TnId, cache: Arc<dyn SessionCache>) -> Self {
		Self {
			tn_id,
			document: json!({}),
			live: json!({}),
			undo_stack: VecDeque::new(),
			state: SessionState::Clean,
			cache,
		}
	}

	/// Adopts a freshly fetched live document as both the working copy and
	/// the `Clean` baseline. Clears the undo history.
	pub async fn load_live(&mut self, document: Document) {
		self.live = document.clone();
		self.document = document;
		self.undo_stack.clear();
		self.state = SessionState::Clean;
		self.save_cache().await;
	}

	/// Resumes a working copy cached by a previous session, comparing it
	/// against the current live baseline. Returns false when no cached copy
	/// exists (or the cache is unreadable), leaving the session untouched.
	/// Call after [`WorkingCopy::load_live`].
	pub async fn resume(&mut self) -> bool {
		match self.cache.load(&self.tn_id).await {
			Ok(Some(document)) => {
				self.state =
					if document == self.live { SessionState::Clean } else { SessionState::Dirty };
				self.document = document;
				true
			}
			Ok(None) => false,
			Err(err) => {
				warn!("Working copy cache load failed for tenant {}: {}", self.tn_id, err);
				false
			}
		}
	}

	/// Replaces the working copy, pushing the previous version onto the
	/// undo stack
	pub async fn edit(&mut self, document: Document) {
		self.undo_stack.push_front(std::mem::replace(&mut self.document, document));
		self.undo_stack.truncate(UNDO_CAPACITY);
		self.state = SessionState::Dirty;
		self.save_cache().await;
	}

	/// Reverts the most recent edit. Returns false when there is nothing to
	/// undo. The session stays `Dirty` unless the reverted document equals
	/// the live baseline.
	pub async fn undo(&mut self) -> bool {
		let Some(previous) = self.undo_stack.pop_front() else {
			return false;
		};

		self.document = previous;
		self.state =
			if self.document == self.live { SessionState::Clean } else { SessionState::Dirty };
		self.save_cache().await;

		true
	}

	/// Records that the current working copy was published successfully.
	/// The undo history survives, so the operator can still step back past
	/// the publish.
	pub fn mark_published(&mut self) {
		self.live = self.document.clone();
		self.state = SessionState::Clean;
	}

	pub fn document(&self) -> &Document {
		&self.document
	}

	pub fn state(&self) -> SessionState {
		self.state
	}

	pub fn is_dirty(&self) -> bool {
		self.state == SessionState::Dirty
	}

	pub fn undo_depth(&self) -> usize {
		self.undo_stack.len()
	}

	async fn save_cache(&self) {
		if let Err(err) = self.cache.save(&self.tn_id, &self.document).await {
			warn!("Working copy cache save failed for tenant {}: {}", self.tn_id, err);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cache::MemorySessionCache;
	use async_trait::async_trait;

	fn working_copy() -> WorkingCopy {
		WorkingCopy::new(TnId::default(), Arc::new(MemorySessionCache::new()))
	}

	#[tokio::test]
	async fn test_starts_clean_and_empty() {
		let wc = working_copy();
		assert_eq!(wc.state(), SessionState::Clean);
		assert_eq!(wc.document(), &json!({}));
		assert_eq!(wc.undo_depth(), 0);
	}

	#[tokio::test]
	async fn test_edit_pushes_undo_and_dirties() {
		let mut wc = working_copy();
		wc.load_live(json!({"services": []})).await;

		wc.edit(json!({"services": [{"id": 1}]})).await;
		wc.edit(json!({"services": [{"id": 1}, {"id": 2}]})).await;

		assert!(wc.is_dirty());
		assert_eq!(wc.undo_depth(), 2);
	}

	#[tokio::test]
	async fn test_undo_restores_previous_document() {
		let mut wc = working_copy();
		wc.load_live(json!({"n": 0})).await;
		wc.edit(json!({"n": 1})).await;
		wc.edit(json!({"n": 2})).await;

		assert!(wc.undo().await);
		assert_eq!(wc.document(), &json!({"n": 1}));
		assert!(wc.is_dirty());
	}

	#[tokio::test]
	async fn test_undo_back_to_live_is_clean() {
		let mut wc = working_copy();
		wc.load_live(json!({"n": 0})).await;
		wc.edit(json!({"n": 1})).await;

		assert!(wc.undo().await);
		assert_eq!(wc.document(), &json!({"n": 0}));
		assert_eq!(wc.state(), SessionState::Clean);
	}

	#[tokio::test]
	async fn test_undo_empty_stack_is_noop() {
		let mut wc = working_copy();
		wc.load_live(json!({"n": 0})).await;

		assert!(!wc.undo().await);
		assert_eq!(wc.document(), &json!({"n": 0}));
	}

	#[tokio::test]
	async fn test_undo_capped_at_ten_drops_oldest() {
		let mut wc = working_copy();
		wc.load_live(json!({"n": -1})).await;

		for i in 0..12 {
			wc.edit(json!({"n": i})).await;
		}
		assert_eq!(wc.undo_depth(), UNDO_CAPACITY);

		// Walk the whole stack back; the two oldest states are gone
		for _ in 0..UNDO_CAPACITY {
			assert!(wc.undo().await);
		}
		assert_eq!(wc.document(), &json!({"n": 1}));
		assert!(!wc.undo().await);
	}

	#[tokio::test]
	async fn test_mark_published_keeps_undo_history() {
		let mut wc = working_copy();
		wc.load_live(json!({"n": 0})).await;
		wc.edit(json!({"n": 1})).await;

		wc.mark_published();
		assert_eq!(wc.state(), SessionState::Clean);
		assert_eq!(wc.undo_depth(), 1);

		// Stepping back past the publish is allowed and dirties the session
		assert!(wc.undo().await);
		assert_eq!(wc.document(), &json!({"n": 0}));
		assert!(wc.is_dirty());
	}

	#[tokio::test]
	async fn test_load_live_resets_session() {
		let mut wc = working_copy();
		wc.load_live(json!({"n": 0})).await;
		wc.edit(json!({"n": 1})).await;

		wc.load_live(json!({"n": 5})).await;
		assert_eq!(wc.state(), SessionState::Clean);
		assert_eq!(wc.undo_depth(), 0);
		assert_eq!(wc.document(), &json!({"n": 5}));
	}

	#[tokio::test]
	async fn test_resume_picks_up_cached_copy() {
		let cache = Arc::new(MemorySessionCache::new());
		let tn_id = TnId::default();

		{
			let mut wc = WorkingCopy::new(tn_id.clone(), cache.clone());
			wc.load_live(json!({"n": 0})).await;
			wc.edit(json!({"n": 7})).await;
		}

		// New session over the same cache, same live baseline
		let mut wc = WorkingCopy::new(tn_id, cache);
		wc.load_live(json!({"n": 0})).await;
		assert!(wc.resume().await);
		assert_eq!(wc.document(), &json!({"n": 7}));
		assert!(wc.is_dirty());
		assert_eq!(wc.undo_depth(), 0);
	}

	#[tokio::test]
	async fn test_resume_matching_live_is_clean() {
		let cache = Arc::new(MemorySessionCache::new());
		let tn_id = TnId::default();

		{
			let mut wc = WorkingCopy::new(tn_id.clone(), cache.clone());
			wc.load_live(json!({"n": 3})).await;
		}

		let mut wc = WorkingCopy::new(tn_id, cache);
		wc.load_live(json!({"n": 3})).await;
		assert!(wc.resume().await);
		assert_eq!(wc.state(), SessionState::Clean);
	}

	#[derive(Debug)]
	struct FailingCache;

	#[async_trait]
	impl SessionCache for FailingCache {
		async fn load(&self, _tn_id: &TnId) -> ClResult<Option<Document>> {
			Err(Error::StorageError)
		}
		async fn save(&self, _tn_id: &TnId, _document: &Document) -> ClResult<()> {
			Err(Error::StorageError)
		}
		async fn clear(&self, _tn_id: &TnId) -> ClResult<()> {
			Err(Error::StorageError)
		}
	}

	#[tokio::test]
	async fn test_cache_failures_do_not_break_editing() {
		let mut wc = WorkingCopy::new(TnId::default(), Arc::new(FailingCache));
		wc.load_live(json!({"n": 0})).await;
		wc.edit(json!({"n": 1})).await;

		assert!(wc.is_dirty());
		assert_eq!(wc.document(), &json!({"n": 1}));
		assert!(!wc.resume().await);
	}
}

// vim: ts=4
