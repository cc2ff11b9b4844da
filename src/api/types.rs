use serde::{Deserialize, Serialize};

use crate::models::PlaceResults;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// Body of every `/api/search` response, success or failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: PlaceResults,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    #[must_use]
    pub const fn success(results: PlaceResults) -> Self {
        Self {
            results,
            error: None,
        }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            results: Vec::new(),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            results: Vec::new(),
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime: u64,
    pub model_configured: bool,
    pub cached_queries: usize,
    pub tracked_callers: usize,
}
