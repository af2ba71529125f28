use std::{
	fmt::Debug,
	io::ErrorKind,
	path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::{
	fs::{File, create_dir_all, read, read_dir, remove_dir_all, remove_file, rename},
	io::AsyncWriteExt,
};

use vellum::{
	checkpoint_adapter::CheckpointAdapter,
	live_adapter::LiveAdapter,
	prelude::*,
	types::{Checkpoint, CheckpointSummary, Document, LiveRecord},
	utils,
};

/// Calculates the path of a tenant's directory
fn tenant_dir(base_dir: &Path, tn_id: &TnId) -> PathBuf {
	PathBuf::from(base_dir).join(tn_id.as_str())
}

/// Calculates the path of a tenant's live document
fn live_path(base_dir: &Path, tn_id: &TnId) -> PathBuf {
	tenant_dir(base_dir, tn_id).join("live.json")
}

fn checkpoint_dir(base_dir: &Path, tn_id: &TnId) -> PathBuf {
	tenant_dir(base_dir, tn_id).join("checkpoints")
}

fn checkpoint_path(base_dir: &Path, tn_id: &TnId, checkpoint_id: &str) -> PathBuf {
	checkpoint_dir(base_dir, tn_id).join(format!("{}.json", checkpoint_id))
}

/// Generated checkpoint ids are alphanumeric. Anything outside that charset
/// (plus `-` and `_`) cannot name a file here, so it reads as missing instead
/// of becoming a path.
fn is_safe_id(checkpoint_id: &str) -> bool {
	!checkpoint_id.is_empty()
		&& checkpoint_id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Writes `json` to `path` through a tmpfile in `dir`, so readers never
/// observe a partially written document
async fn write_json_atomic(dir: &Path, path: &Path, json: String) -> ClResult<()> {
	let tmp_path = PathBuf::from(dir).join(format!("tmp-{}", utils::random_id()?));

	let mut file = File::create(&tmp_path).await?;
	let res = async {
		file.write_all(json.as_bytes()).await?;
		file.sync_all().await?;
		rename(&tmp_path, path).await?;
		Ok::<(), Error>(())
	}
	.await;
	if res.is_err() {
		debug!("write failed, removing tmpfile: {:?}", &tmp_path);
		let _ = remove_file(&tmp_path).await;
	}

	res
}

/// Reads every checkpoint of a tenant, newest first. Directory entries carry
/// no insertion order, so equal stamps tie-break on id.
async fn read_all_checkpoints(base_dir: &Path, tn_id: &TnId) -> ClResult<Vec<Checkpoint>> {
	let mut entries = match read_dir(checkpoint_dir(base_dir, tn_id)).await {
		Ok(entries) => entries,
		Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
		Err(err) => return Err(err.into()),
	};

	let mut checkpoints = Vec::new();
	while let Some(entry) = entries.next_entry().await? {
		let path = entry.path();
		// Skips tmpfiles left behind by interrupted writes
		if path.extension().is_none_or(|ext| ext != "json") {
			continue;
		}
		let bytes = read(&path).await?;
		checkpoints.push(serde_json::from_slice::<Checkpoint>(&bytes).or(Err(Error::StorageError))?);
	}
	checkpoints.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

	Ok(checkpoints)
}

#[derive(Debug)]
pub struct StoreAdapterFs {
	base_dir: Box<Path>,
}

impl StoreAdapterFs {
	pub async fn new(base_dir: Box<Path>) -> ClResult<Self> {
		create_dir_all(&base_dir).await?;
		Ok(Self { base_dir })
	}
}

#[async_trait]
impl LiveAdapter for StoreAdapterFs {
	async fn read_live(&self, tn_id: &TnId) -> ClResult<Option<LiveRecord>> {
		match read(live_path(&self.base_dir, tn_id)).await {
			Ok(bytes) => {
				Ok(Some(serde_json::from_slice(&bytes).or(Err(Error::StorageError))?))
			}
			Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
			Err(err) => Err(err.into()),
		}
	}

	async fn update_live(&self, tn_id: &TnId, document: &Document) -> ClResult<Timestamp> {
		let dir = tenant_dir(&self.base_dir, tn_id);
		create_dir_all(&dir).await?;

		let updated_at = Timestamp::now();
		let record =
			LiveRecord { tn_id: tn_id.clone(), document: document.clone(), updated_at };
		write_json_atomic(&dir, &live_path(&self.base_dir, tn_id), serde_json::to_string(&record)?)
			.await?;

		Ok(updated_at)
	}
}

#[async_trait]
impl CheckpointAdapter for StoreAdapterFs {
	async fn create_checkpoint(&self, tn_id: &TnId, checkpoint: &Checkpoint) -> ClResult<()> {
		let dir = checkpoint_dir(&self.base_dir, tn_id);
		create_dir_all(&dir).await?;

		write_json_atomic(
			&dir,
			&checkpoint_path(&self.base_dir, tn_id, &checkpoint.id),
			serde_json::to_string(checkpoint)?,
		)
		.await
	}

	async fn list_checkpoints(&self, tn_id: &TnId) -> ClResult<Vec<CheckpointSummary>> {
		let checkpoints = read_all_checkpoints(&self.base_dir, tn_id).await?;

		Ok(checkpoints.iter().map(Checkpoint::summary).collect())
	}

	async fn read_checkpoint(&self, tn_id: &TnId, checkpoint_id: &str) -> ClResult<Checkpoint> {
		if !is_safe_id(checkpoint_id) {
			return Err(Error::NotFound);
		}

		match read(checkpoint_path(&self.base_dir, tn_id, checkpoint_id)).await {
			Ok(bytes) => serde_json::from_slice(&bytes).or(Err(Error::StorageError)),
			Err(err) if err.kind() == ErrorKind::NotFound => Err(Error::NotFound),
			Err(err) => Err(err.into()),
		}
	}

	async fn delete_checkpoints(&self, tn_id: &TnId) -> ClResult<()> {
		match remove_dir_all(checkpoint_dir(&self.base_dir, tn_id)).await {
			Ok(()) => Ok(()),
			Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
			Err(err) => Err(err.into()),
		}
	}

	async fn prune_checkpoints(&self, tn_id: &TnId, keep: u32) -> ClResult<u32> {
		let checkpoints = read_all_checkpoints(&self.base_dir, tn_id).await?;

		let mut pruned = 0;
		for checkpoint in checkpoints.iter().skip(keep as usize) {
			remove_file(checkpoint_path(&self.base_dir, tn_id, &checkpoint.id)).await?;
			pruned += 1;
		}

		Ok(pruned)
	}
}


// vim: ts=4
