//! Request span and HTTP metrics shared by every route.

use axum::{
    extract::{MatchedPath, Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{Instrument, field};
use uuid::Uuid;

use crate::api::AppState;

/// Route label for requests no route matched.
const UNROUTED: &str = "unrouted";

/// GET /metrics
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Response {
    match &state.prometheus_handle {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "Metrics are disabled").into_response(),
    }
}

/// Opens the `search_api` span the handlers record into (`caller` is filled
/// in by the search handler) and counts the request once it is answered.
pub async fn track_requests(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or(UNROUTED, MatchedPath::as_str)
        .to_owned();

    let span = tracing::info_span!(
        "search_api",
        id = %Uuid::new_v4(),
        %method,
        uri = %req.uri().path(),
        caller = field::Empty,
    );

    let response = next.run(req).instrument(span.clone()).await;
    let status = response.status();
    let elapsed = started.elapsed();

    record_request(&method, &route, status, elapsed);

    span.in_scope(|| {
        tracing::info!(
            status = status.as_u16(),
            outcome = outcome_label(status),
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "Answered {} {}",
            method,
            route
        );
    });

    response
}

fn record_request(method: &Method, route: &str, status: StatusCode, elapsed: Duration) {
    let labels = [
        ("method", method.as_str().to_owned()),
        ("route", route.to_owned()),
        ("outcome", outcome_label(status).to_owned()),
    ];

    metrics::counter!("http_requests_total", &labels).increment(1);
    metrics::histogram!("http_request_duration_seconds", &labels).record(elapsed.as_secs_f64());
}

/// Coarse classification used as the `outcome` label and log field.
fn outcome_label(status: StatusCode) -> &'static str {
    if status == StatusCode::TOO_MANY_REQUESTS {
        "throttled"
    } else if status.is_server_error() {
        "failed"
    } else if status.is_client_error() {
        "rejected"
    } else {
        "served"
    }
}
