//! Error type shared by every crate in the workspace.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// Malformed input; the message is shown to the caller
	ValidationError(String),
	/// Resource missing, or owned by another tenant (indistinguishable)
	NotFound,
	/// Missing or invalid bearer token
	Unauthorized,
	/// Authenticated but lacking the required role
	PermissionDenied,
	/// Underlying store unreachable or a write failed; safe to retry
	StorageError,
	/// Configuration or startup invariant broken
	Internal(String),

	// externals
	IoError(std::io::Error),
	JsonError(serde_json::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::IoError(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::JsonError(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::NotFound => write!(f, "not found"),
			Error::Unauthorized => write!(f, "unauthorized"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::StorageError => write!(f, "storage error"),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::IoError(err) => write!(f, "io error: {}", err),
			Error::JsonError(err) => write!(f, "json error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let (status, code, message) = match self {
			Error::ValidationError(msg) => (StatusCode::BAD_REQUEST, "validation", msg),
			Error::NotFound => (StatusCode::NOT_FOUND, "not-found", "not found".to_string()),
			Error::Unauthorized => {
				(StatusCode::UNAUTHORIZED, "unauthorized", "missing or invalid token".to_string())
			}
			Error::PermissionDenied => {
				(StatusCode::FORBIDDEN, "permission-denied", "permission denied".to_string())
			}
			Error::StorageError | Error::IoError(_) => (
				StatusCode::SERVICE_UNAVAILABLE,
				"storage",
				"store unavailable, retry later".to_string(),
			),
			Error::Internal(_) | Error::JsonError(_) => {
				(StatusCode::INTERNAL_SERVER_ERROR, "internal", "internal error".to_string())
			}
		};

		(status, Json(json!({ "error": code, "message": message }))).into_response()
	}
}


// vim: ts=4
