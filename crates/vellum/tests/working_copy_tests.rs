//! Working copy integration tests
//!
//! Drives the session state machine against the real store, the way an
//! editing client would: fetch live, edit locally, publish, resume a draft
//! after a reload.

mod common;

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use common::{create_test_app, tn};
use vellum::checkpoint_adapter::CheckpointAdapter;
use vellum::session::{FileSessionCache, RecentCheckpoints, SessionState, WorkingCopy};
use vellum::store::service;

async fn session_cache(temp: &TempDir) -> Arc<FileSessionCache> {
	Arc::new(
		FileSessionCache::new(temp.path().join("drafts").into())
			.await
			.expect("Failed to create session cache"),
	)
}

#[tokio::test]
async fn test_edit_publish_flow() {
	let (app, temp) = create_test_app().await;
	let tn_id = tn("acme");

	let mut wc = WorkingCopy::new(tn_id.clone(), session_cache(&temp).await);
	wc.load_live(service::read_live(&app, &tn_id).await.expect("read")).await;
	assert_eq!(wc.state(), SessionState::Clean);

	wc.edit(json!({"services": [{"id": 1}]})).await;
	assert!(wc.is_dirty());

	service::publish(&app, &tn_id, wc.document()).await.expect("publish");
	wc.mark_published();

	assert_eq!(wc.state(), SessionState::Clean);
	assert_eq!(service::read_live(&app, &tn_id).await.expect("read"), *wc.document());
}

#[tokio::test]
async fn test_draft_survives_reload() {
	let (app, temp) = create_test_app().await;
	let tn_id = tn("acme");
	let draft = json!({"services": [{"id": 1}, {"id": 2}]});

	service::publish(&app, &tn_id, &json!({"services": [{"id": 1}]})).await.expect("publish");

	{
		let mut wc = WorkingCopy::new(tn_id.clone(), session_cache(&temp).await);
		wc.load_live(service::read_live(&app, &tn_id).await.expect("read")).await;
		wc.edit(draft.clone()).await;
	}

	// Same cache directory, fresh client
	let mut wc = WorkingCopy::new(tn_id.clone(), session_cache(&temp).await);
	wc.load_live(service::read_live(&app, &tn_id).await.expect("read")).await;
	assert!(wc.resume().await);
	assert_eq!(*wc.document(), draft);
	assert!(wc.is_dirty());
}

#[tokio::test]
async fn test_publishing_a_restored_draft() {
	let (app, temp) = create_test_app().await;
	let tn_id = tn("acme");
	let snapshot = json!({"services": [{"id": 1}]});

	let checkpoint =
		service::create_checkpoint(&app, &tn_id, None, snapshot.clone()).await.expect("checkpoint");
	service::publish(&app, &tn_id, &json!({"services": []})).await.expect("publish");

	// The operator pulls the checkpointed document into the working copy,
	// inspects it, then restores it server-side
	let mut wc = WorkingCopy::new(tn_id.clone(), session_cache(&temp).await);
	wc.load_live(service::read_live(&app, &tn_id).await.expect("read")).await;
	wc.edit(checkpoint.document.clone()).await;
	assert!(wc.is_dirty());

	service::restore(&app, &tn_id, &checkpoint.id).await.expect("restore");
	wc.mark_published();

	assert_eq!(service::read_live(&app, &tn_id).await.expect("read"), snapshot);
	assert_eq!(wc.state(), SessionState::Clean);
}

#[tokio::test]
async fn test_recent_checkpoints_track_newest_two() {
	let (app, _temp) = create_test_app().await;
	let tn_id = tn("acme");
	let mut recent = RecentCheckpoints::new();

	for i in 0..3 {
		let checkpoint = service::create_checkpoint(&app, &tn_id, None, json!({"services": [i]}))
			.await
			.expect("checkpoint");
		recent.push(checkpoint);
	}

	assert_eq!(recent.len(), 2);

	let listed = app.checkpoint_adapter.list_checkpoints(&tn_id).await.expect("list");
	assert_eq!(recent.latest().expect("latest").id, listed[0].id);
	assert_eq!(recent.items()[1].id, listed[1].id);
}

// vim: ts=4
