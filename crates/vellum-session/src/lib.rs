//! Client-side working copy session for the Vellum store.
//!
//! Holds the document an operator is editing before it is checkpointed or
//! published: a bounded undo stack, Clean/Dirty tracking against the last
//! known live document, and pluggable caches so a restarted client can pick
//! up where it left off.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod recent;
pub mod session;

mod prelude;

pub use cache::{FileSessionCache, MemorySessionCache, SessionCache};
pub use recent::{RecentCheckpoints, RECENT_CAPACITY};
pub use session::{SessionState, WorkingCopy, UNDO_CAPACITY};

// vim: ts=4
