//! Common types used throughout the Vellum store.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use crate::prelude::*;
pub use crate::delta::Delta;

/// A tenant's dataset. Opaque to the store; only the delta calculator looks
/// inside, and only along configured collection paths.
pub type Document = serde_json::Value;

// TnId //
//******//
pub const TN_ID_MAX_LEN: usize = 64;

/// Tenant namespace key. Every store operation is scoped by one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TnId(Box<str>);

impl TnId {
	/// Parses and validates a tenant id.
	///
	/// Allowed: 1..=64 characters of alphanumeric, dot, underscore, hyphen,
	/// not starting or ending with a dot. The charset keeps tenant keys safe
	/// to embed in SQL rows and filesystem paths without escaping.
	pub fn new(tn_id: &str) -> ClResult<TnId> {
		if tn_id.is_empty() {
			return Err(Error::ValidationError("tenant id cannot be empty".to_string()));
		}
		if tn_id.len() > TN_ID_MAX_LEN {
			return Err(Error::ValidationError(format!(
				"tenant id too long (max {} characters)",
				TN_ID_MAX_LEN
			)));
		}
		let valid_chars = |c: char| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-';
		if !tn_id.chars().all(valid_chars) {
			return Err(Error::ValidationError(
				"invalid tenant id characters (allowed: alphanumeric, dot, underscore, hyphen)"
					.to_string(),
			));
		}
		// Leading/trailing dots would allow "." and ".." as tenant keys
		if tn_id.starts_with('.') || tn_id.ends_with('.') {
			return Err(Error::ValidationError(
				"tenant id cannot start or end with a dot".to_string(),
			));
		}
		Ok(TnId(Box::from(tn_id)))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Default for TnId {
	fn default() -> Self {
		TnId(Box::from("public"))
	}
}

impl std::fmt::Display for TnId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for TnId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for TnId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		TnId::new(&s).map_err(serde::de::Error::custom)
	}
}

// Timestamp //
//***********//
/// Epoch milliseconds
#[derive(Clone, Copy, Debug, Default)]
pub struct Timestamp(pub i64);

impl Timestamp {
	pub fn now() -> Timestamp {
		let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
		Timestamp(res.as_millis() as i64)
	}
}

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::cmp::PartialEq for Timestamp {
	fn eq(&self, other: &Self) -> bool {
		self.0 == other.0
	}
}

impl std::cmp::PartialOrd for Timestamp {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		self.0.partial_cmp(&other.0)
	}
}

impl std::cmp::Eq for Timestamp {}

impl std::cmp::Ord for Timestamp {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.0.cmp(&other.0)
	}
}

impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(Timestamp(i64::deserialize(deserializer)?))
	}
}

// Store records //
//***************//
/// The single published document of a tenant.
///
/// Mutated only through the publish pipeline, never deleted. A tenant that
/// has never published has no record; readers see an empty document instead.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveRecord {
	#[serde(rename = "tenantId")]
	pub tn_id: TnId,
	pub document: Document,
	pub updated_at: Timestamp,
}

/// An immutable snapshot of a document plus metadata.
///
/// `delta` is computed once at creation time against the live document that
/// existed at that moment, not against the previous checkpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
	pub id: Box<str>,
	#[serde(rename = "tenantId")]
	pub tn_id: TnId,
	pub message: Box<str>,
	pub document: Document,
	pub delta: Delta,
	pub created_at: Timestamp,
}

impl Checkpoint {
	pub fn summary(&self) -> CheckpointSummary {
		CheckpointSummary {
			id: self.id.clone(),
			message: self.message.clone(),
			delta: self.delta.clone(),
			created_at: self.created_at,
		}
	}
}

/// Checkpoint metadata without the document payload
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointSummary {
	pub id: Box<str>,
	pub message: Box<str>,
	pub delta: Delta,
	pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_tn_id_valid() {
		assert!(TnId::new("public").is_ok());
		assert!(TnId::new("acme").is_ok());
		assert!(TnId::new("acme-staging").is_ok());
		assert!(TnId::new("customer_42.eu").is_ok());
	}

	#[test]
	fn test_tn_id_invalid() {
		assert!(TnId::new("").is_err());
		assert!(TnId::new("has space").is_err());
		assert!(TnId::new("slash/y").is_err());
		assert!(TnId::new("..").is_err());
		assert!(TnId::new(".hidden").is_err());
		assert!(TnId::new("trailing.").is_err());
		assert!(TnId::new(&"x".repeat(65)).is_err());
	}

	#[test]
	fn test_tn_id_default() {
		assert_eq!(TnId::default().as_str(), "public");
	}

	#[test]
	fn test_tn_id_serde() {
		let tn_id: TnId = serde_json::from_str("\"acme\"").unwrap();
		assert_eq!(tn_id.as_str(), "acme");
		assert_eq!(serde_json::to_string(&tn_id).unwrap(), "\"acme\"");

		assert!(serde_json::from_str::<TnId>("\"../evil\"").is_err());
	}

	#[test]
	fn test_timestamp_ordering() {
		assert!(Timestamp(1) < Timestamp(2));
		assert_eq!(Timestamp(5), Timestamp(5));
		let now = Timestamp::now();
		assert!(now.0 > 1_600_000_000_000);
	}

	#[test]
	fn test_checkpoint_summary_drops_document() {
		let cp = Checkpoint {
			id: "abc".into(),
			tn_id: TnId::default(),
			message: "first".into(),
			document: serde_json::json!({"services": [1, 2]}),
			delta: Delta::default(),
			created_at: Timestamp(1000),
		};
		let summary = cp.summary();
		assert_eq!(summary.id.as_ref(), "abc");
		let json = serde_json::to_value(&summary).unwrap();
		assert!(json.get("document").is_none());
		assert_eq!(json.get("createdAt").and_then(|v| v.as_i64()), Some(1000));
	}
}

// vim: ts=4
