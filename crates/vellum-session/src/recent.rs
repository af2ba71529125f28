//! Two-slot cache of recently fetched checkpoints
//!
//! Offline display only: when the server is unreachable the client can
//! still show the operator the last checkpoints it saw.

use vellum_types::types::Checkpoint;

/// Checkpoints kept for offline display
pub const RECENT_CAPACITY: usize = 2;

#[derive(Debug, Default)]
pub struct RecentCheckpoints {
	/// Most recently fetched first
	items: Vec<Checkpoint>,
}

impl RecentCheckpoints {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records a fetched checkpoint as most recent. Re-fetching a checkpoint
	/// moves it to the front instead of duplicating it; the oldest entry
	/// falls out past capacity.
	pub fn push(&mut self, checkpoint: Checkpoint) {
		self.items.retain(|c| c.id != checkpoint.id);
		self.items.insert(0, checkpoint);
		self.items.truncate(RECENT_CAPACITY);
	}

	pub fn items(&self) -> &[Checkpoint] {
		&self.items
	}

	pub fn latest(&self) -> Option<&Checkpoint> {
		self.items.first()
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn clear(&mut self) {
		self.items.clear();
	}
}


// vim: ts=4
