//! Shared types, adapter traits, and core utilities for the Vellum store.
//!
//! This crate contains the foundational types that are shared between the
//! main crate and all adapter implementations. Extracting these into a
//! separate crate allows adapter crates to compile in parallel with the
//! service modules.

pub mod auth_adapter;
pub mod checkpoint_adapter;
pub mod delta;
pub mod error;
pub mod live_adapter;
pub mod prelude;
pub mod types;
pub mod utils;

// vim: ts=4
