//! Handler failures and how each one is rendered to the client.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ApiError {
  /// No resource with this id in the current snapshot.
  #[error("resource {0} not found")]
  UnknownResource(Uuid),

  /// A query parameter was malformed or inconsistent with another.
  #[error("invalid `{param}`: {reason}")]
  InvalidParam { param: &'static str, reason: String },

  #[error("catalog unavailable: {0}")]
  Catalog(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("failed to encode response: {0}")]
  Encode(#[from] serde_json::Error),
}

impl ApiError {
  pub(crate) fn invalid(param: &'static str, reason: impl Into<String>) -> Self {
    Self::InvalidParam {
      param,
      reason: reason.into(),
    }
  }

  pub(crate) fn catalog<E>(error: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Catalog(Box::new(error))
  }

  pub fn status(&self) -> StatusCode {
    match self {
      Self::UnknownResource(_) => StatusCode::NOT_FOUND,
      Self::InvalidParam { .. } => StatusCode::BAD_REQUEST,
      Self::Catalog(_) | Self::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  /// `{"error": "..."}`. Server-side failures are logged in full and reach
  /// the client only as a generic message.
  fn into_response(self) -> Response {
    let status = self.status();
    let message = if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
      "internal error".to_owned()
    } else {
      self.to_string()
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
