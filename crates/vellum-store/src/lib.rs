//! Store subsystem. Live documents, checkpoints, restore.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod handler;
pub mod service;

mod prelude;

// vim: ts=4
