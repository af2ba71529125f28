pub use vellum_types::error::{ClResult, Error};
pub use vellum_types::types::{Document, TnId};

pub use tracing::{debug, warn};

// vim: ts=4
