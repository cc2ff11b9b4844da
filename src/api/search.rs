use axum::{Json, body::Bytes, extract::State, http::HeaderMap};
use std::sync::Arc;
use tracing::debug;

use super::validation::{caller_id, validate_search_query};
use super::{ApiError, AppState, SearchRequest, SearchResponse};

/// POST /api/search
///
/// The caller is counted against its rate-limit bucket before the body is
/// even decoded, so malformed requests still use up the window.
pub async fn search_places(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SearchResponse>, ApiError> {
    let caller = caller_id(&headers, &state.config().server.forwarded_header);
    tracing::Span::current().record("caller", caller.as_str());

    if !state.rate_limiter().check_and_consume(&caller) {
        metrics::counter!("search_rate_limited_total").increment(1);
        return Err(ApiError::rate_limited(caller));
    }

    let request: SearchRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::internal(format!("Invalid request body: {e}")))?;

    let query = validate_search_query(request.query.as_deref())?;
    debug!(caller = %caller, "Resolving search query");

    let results = state.search_service().resolve(query).await?;

    Ok(Json(SearchResponse::success(results)))
}
