pub use vellum_core::app::App;
pub use vellum_types::error::{ClResult, Error};
pub use vellum_types::types::{Document, Timestamp, TnId};

pub use tracing::{debug, error, info, warn};

// vim: ts=4
