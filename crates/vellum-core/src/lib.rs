//! Core infrastructure for the Vellum store.
//!
//! Shared application state, request extractors and the auth middleware
//! used by the main crate and the store handlers.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod extract;
pub mod prelude;
pub mod roles;
pub mod route_auth;

// Re-export commonly used types
pub use app::{Adapters, App, AppBuilderOpts, AppState, VERSION};
pub use extract::{Auth, Tenant};

// vim: ts=4
