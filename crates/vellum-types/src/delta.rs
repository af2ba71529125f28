//! Structural delta calculation between two documents.
//!
//! A delta is a signed per-collection count answering "how many entities
//! were added or removed" between a baseline document and a new one. The
//! calculator is schema-agnostic: callers supply the collection paths worth
//! counting (e.g. `services`, or `cohorts.courses.lessons` for the total
//! number of lessons across all cohorts and courses).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::prelude::*;
use crate::types::Document;

// CollectionPath //
//****************//
/// A dotted path naming a countable collection inside a document,
/// e.g. `"services"` or `"cohorts.courses.lessons"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionPath {
	segments: Box<[Box<str>]>,
}

impl CollectionPath {
	/// Display name used as the delta map key (the last path segment)
	pub fn name(&self) -> &str {
		self.segments.last().map_or("", |s| s.as_ref())
	}

	pub fn segments(&self) -> &[Box<str>] {
		&self.segments
	}
}

impl FromStr for CollectionPath {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.is_empty() {
			return Err(Error::ValidationError("collection path cannot be empty".to_string()));
		}
		let segments: Vec<Box<str>> = s.split('.').map(Box::from).collect();
		if segments.iter().any(|seg| seg.is_empty()) {
			return Err(Error::ValidationError(format!(
				"collection path '{}' has an empty segment",
				s
			)));
		}
		Ok(CollectionPath { segments: segments.into_boxed_slice() })
	}
}

impl std::fmt::Display for CollectionPath {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.segments.join("."))
	}
}

// Counting //
//**********//
fn size_of(value: &Value) -> i64 {
	match value {
		Value::Array(items) => items.len() as i64,
		Value::Object(map) => map.len() as i64,
		_ => 0,
	}
}

fn count_at(value: &Value, segments: &[Box<str>]) -> i64 {
	let Some((head, rest)) = segments.split_first() else {
		return size_of(value);
	};
	match value {
		// An intermediate array fans the remaining path out over its elements
		Value::Array(items) => items.iter().map(|item| count_at(item, segments)).sum(),
		Value::Object(map) => match map.get(head.as_ref()) {
			Some(v) if rest.is_empty() => size_of(v),
			Some(v) => count_at(v, rest),
			None => 0,
		},
		_ => 0,
	}
}

/// Counts the members of one collection inside a document.
///
/// Arrays count by length, objects by key count; a missing or non-countable
/// value counts as 0. For nested paths the count is the total number of leaf
/// items across all parents.
pub fn count(document: &Document, path: &CollectionPath) -> i64 {
	count_at(document, path.segments())
}

// Delta //
//*******//
/// Signed per-collection counts summarizing structural change between two
/// documents. Serializes as a plain JSON object: `{"cohorts": 1, "lessons": -2}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Delta(pub BTreeMap<Box<str>, i64>);

impl Delta {
	pub fn get(&self, name: &str) -> i64 {
		self.0.get(name).copied().unwrap_or(0)
	}

	/// Total absolute change across all collections
	pub fn magnitude(&self) -> i64 {
		self.0.values().map(|v| v.abs()).sum()
	}

	pub fn severity(&self) -> Severity {
		Severity::of(self.magnitude())
	}
}

/// Computes the per-collection delta of `after` relative to `before`.
///
/// Deterministic and side-effect free. A collection missing from either
/// document counts as 0 on that side. When two paths share a display name
/// the later one wins.
pub fn delta(before: &Document, after: &Document, paths: &[CollectionPath]) -> Delta {
	let mut map = BTreeMap::new();
	for path in paths {
		map.insert(Box::from(path.name()), count(after, path) - count(before, path));
	}
	Delta(map)
}

// Severity //
//**********//
/// Coarse classification of a delta for display purposes.
///
/// The calculator itself is policy-free; these thresholds belong to the
/// consuming layer and are provided here so every consumer labels changes
/// the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
	NoChange,
	Low,
	Medium,
	High,
}

impl Severity {
	/// Classifies a total absolute change: 0, ≤2, ≤5, above
	pub fn of(magnitude: i64) -> Severity {
		match magnitude {
			0 => Severity::NoChange,
			1..=2 => Severity::Low,
			3..=5 => Severity::Medium,
			_ => Severity::High,
		}
	}
}

impl std::fmt::Display for Severity {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Severity::NoChange => write!(f, "No change"),
			Severity::Low => write!(f, "Low"),
			Severity::Medium => write!(f, "Medium"),
			Severity::High => write!(f, "High"),
		}
	}
}


// vim: ts=4
