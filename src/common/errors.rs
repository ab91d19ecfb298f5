use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::server::now_ms;

/// JSON error body returned by every failing route.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
  /// Unix timestamp in milliseconds.
  pub timestamp: u64,
  /// HTTP status code.
  pub status: u16,
  /// HTTP status reason phrase (e.g. "Bad Request").
  pub error: String,
  /// Human-readable error message.
  pub message: String,
  /// The request path that caused the error.
  pub path: String,
  /// Extra diagnostics, such as a partial parse.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

impl ApiError {
  fn with_status(status: StatusCode, message: impl Into<String>, path: impl Into<String>) -> Self {
    Self {
      timestamp: now_ms(),
      status: status.as_u16(),
      error: status.canonical_reason().unwrap_or("Unknown").to_string(),
      message: message.into(),
      path: path.into(),
      details: None,
    }
  }

  pub fn bad_request(message: impl Into<String>, path: impl Into<String>) -> Self {
    Self::with_status(StatusCode::BAD_REQUEST, message, path)
  }

  pub fn unauthorized(message: impl Into<String>, path: impl Into<String>) -> Self {
    Self::with_status(StatusCode::UNAUTHORIZED, message, path)
  }

  pub fn not_found(message: impl Into<String>, path: impl Into<String>) -> Self {
    Self::with_status(StatusCode::NOT_FOUND, message, path)
  }

  pub fn unprocessable(message: impl Into<String>, path: impl Into<String>) -> Self {
    Self::with_status(StatusCode::UNPROCESSABLE_ENTITY, message, path)
  }

  pub fn internal(message: impl Into<String>, path: impl Into<String>) -> Self {
    Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, message, path)
  }

  pub fn details(mut self, details: serde_json::Value) -> Self {
    self.details = Some(details);
    self
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(self)).into_response()
  }
}
