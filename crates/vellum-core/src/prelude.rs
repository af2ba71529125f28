//! Common imports for crates building on vellum-core

pub use crate::app::App;
pub use vellum_types::error::{ClResult, Error};
pub use vellum_types::types::{Document, Timestamp, TnId};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
