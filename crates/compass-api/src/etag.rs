//! ETag computation for query responses.
//!
//! The tag is a SHA-256 hash over the serialised response body, so the same
//! catalog snapshot and query always produce the same tag.

use axum::http::{HeaderMap, header};
use sha2::{Digest, Sha256};

/// Compute a strong, quoted ETag for `body`.
pub fn compute_etag(body: &[u8]) -> String {
  let hash = Sha256::digest(body);
  format!("\"{}\"", hex::encode(hash))
}

/// Whether the request's `If-None-Match` header already names `etag`.
///
/// Accepts a comma-separated list, weak validators, and `*`.
pub fn matches_if_none_match(headers: &HeaderMap, etag: &str) -> bool {
  let Some(value) = headers
    .get(header::IF_NONE_MATCH)
    .and_then(|v| v.to_str().ok())
  else {
    return false;
  };
  value.split(',').map(str::trim).any(|candidate| {
    candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == etag
  })
}
