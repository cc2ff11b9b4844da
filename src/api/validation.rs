use axum::http::HeaderMap;

use super::ApiError;
use crate::constants::limits::UNKNOWN_CALLER;

/// Returns the query untouched when it has any non-whitespace content.
pub fn validate_search_query(query: Option<&str>) -> Result<&str, ApiError> {
    match query {
        Some(q) if !q.trim().is_empty() => Ok(q),
        Some(_) => Err(ApiError::validation("Search query cannot be empty")),
        None => Err(ApiError::validation("Search query is required")),
    }
}

/// Rate-limit bucket for a request: the forwarded address header as sent,
/// or `"unknown"` when it is missing, blank or not valid text.
#[must_use]
pub fn caller_id(headers: &HeaderMap, header_name: &str) -> String {
    headers
        .get(header_name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN_CALLER)
        .to_string()
}
