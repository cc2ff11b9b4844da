use axum::{Json, extract::State};
use std::sync::Arc;

use super::{AppState, HealthStatus};

/// GET /api/health
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime: state.start_time.elapsed().as_secs(),
        model_configured: state.config().has_api_key(),
        cached_queries: state.shared.cache.len(),
        tracked_callers: state.rate_limiter().tracked_callers(),
    })
}
