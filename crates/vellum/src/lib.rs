//! Vellum is a multi-tenant store for mutable JSON documents.
//!
//! # Features
//!
//! - One live document per tenant
//!     - reads never fail, unknown tenants see an empty document
//!     - atomic publish, last write wins
//! - Checkpoint history
//!     - immutable snapshots with a message and a change summary
//!     - restore re-publishes a snapshot through the same pipeline
//! - Delta summaries over configured collection paths
//! - Working-copy sessions with undo and pluggable draft caching
//! - Storage through adapters (SQLite and filesystem included)

// Re-export shared types and adapter traits from vellum-types
pub use vellum_types::auth_adapter;
pub use vellum_types::checkpoint_adapter;
pub use vellum_types::delta;
pub use vellum_types::error;
pub use vellum_types::live_adapter;
pub use vellum_types::types;
pub use vellum_types::utils;

// Re-export core infrastructure
pub use vellum_core::extract;
pub use vellum_core::roles;
pub use vellum_core::route_auth;

// Feature crate re-exports
pub use vellum_session as session;
pub use vellum_store as store;

// Local modules
pub mod app;
pub mod prelude;
pub mod routes;

pub use crate::app::{App, AppBuilder};

// vim: ts=4
