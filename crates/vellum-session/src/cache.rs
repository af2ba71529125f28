//! Pluggable persistence for working copies
//!
//! One slot per tenant, overwritten on every edit. The cache only has to
//! survive reloads; the live fetch always wins on the next load.

use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{create_dir_all, remove_file, rename, File};
use tokio::io::AsyncWriteExt;

use crate::prelude::*;
use vellum_types::utils;

#[async_trait]
pub trait SessionCache: Debug + Send + Sync {
	/// Reads the cached working copy for a tenant, if any
	async fn load(&self, tn_id: &TnId) -> ClResult<Option<Document>>;
	/// Overwrites the tenant's cache slot
	async fn save(&self, tn_id: &TnId, document: &Document) -> ClResult<()>;
	/// Drops the tenant's cache slot. Clearing an empty slot is not an error.
	async fn clear(&self, tn_id: &TnId) -> ClResult<()>;
}

// MemorySessionCache //
//********************//
/// Keeps working copies in process memory. Survives nothing; useful for
/// tests and single-run tools.
#[derive(Debug, Default)]
pub struct MemorySessionCache {
	slots: parking_lot::Mutex<HashMap<TnId, Document>>,
}

impl MemorySessionCache {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl SessionCache for MemorySessionCache {
	async fn load(&self, tn_id: &TnId) -> ClResult<Option<Document>> {
		Ok(self.slots.lock().get(tn_id).cloned())
	}

	async fn save(&self, tn_id: &TnId, document: &Document) -> ClResult<()> {
		self.slots.lock().insert(tn_id.clone(), document.clone());
		Ok(())
	}

	async fn clear(&self, tn_id: &TnId) -> ClResult<()> {
		self.slots.lock().remove(tn_id);
		Ok(())
	}
}

// FileSessionCache //
//******************//
fn slot_path(base_dir: &Path, tn_id: &TnId) -> PathBuf {
	PathBuf::from(base_dir).join(format!("{}.json", tn_id))
}

/// Persists working copies as one JSON file per tenant. Writes go through a
/// temp file and rename; a crash leaves either the old slot or the new one,
/// never a torn file.
#[derive(Debug)]
pub struct FileSessionCache {
	base_dir: Box<Path>,
}

impl FileSessionCache {
	pub async fn new(base_dir: Box<Path>) -> ClResult<Self> {
		create_dir_all(&base_dir).await?;
		Ok(Self { base_dir })
	}
}

#[async_trait]
impl SessionCache for FileSessionCache {
	async fn load(&self, tn_id: &TnId) -> ClResult<Option<Document>> {
		match tokio::fs::read(slot_path(&self.base_dir, tn_id)).await {
			Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
			Err(err) => Err(err.into()),
		}
	}

	async fn save(&self, tn_id: &TnId, document: &Document) -> ClResult<()> {
		let tmp_path =
			PathBuf::from(&*self.base_dir).join(format!("tmp-{}", utils::random_id()?));

		let mut file = File::create(&tmp_path).await?;
		let res = async {
			file.write_all(&serde_json::to_vec(document)?).await?;
			file.sync_all().await?;
			rename(&tmp_path, slot_path(&self.base_dir, tn_id)).await?;
			Ok::<(), Error>(())
		}
		.await;
		if res.is_err() {
			debug!("Working copy write failed, removing tmpfile: {:?}", &tmp_path);
			let _ = remove_file(&tmp_path).await;
		}

		res
	}

	async fn clear(&self, tn_id: &TnId) -> ClResult<()> {
		match remove_file(slot_path(&self.base_dir, tn_id)).await {
			Ok(()) => Ok(()),
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
			Err(err) => Err(err.into()),
		}
	}
}


// vim: ts=4
