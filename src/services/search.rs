//! Resolves a free-text query into place recommendations.
//!
//! Flow: reject blank queries, serve a fresh cache entry when there is one,
//! otherwise ask the model for a JSON object, repair its shape and cache the
//! outcome.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::cache::{ResultCache, cache_key};
use super::normalize::classify;
use super::prompt::system_prompt;
use crate::clients::{ChatMessage, CompletionBackend, CompletionRequest};
use crate::config::Config;
use crate::models::PlaceResults;

/// Content assumed when the model answers with nothing.
const EMPTY_ANSWER: &str = r#"{"results": []}"#;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search query cannot be empty")]
    EmptyQuery,

    #[error("Model API key is not configured")]
    MissingCredentials,

    #[error("Model returned invalid JSON: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Model request failed: {0}")]
    Upstream(#[from] anyhow::Error),
}

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub model: String,
    pub temperature: f32,
    pub result_count: usize,
    pub cache_format_issues: bool,
}

impl From<&Config> for SearchSettings {
    fn from(config: &Config) -> Self {
        Self {
            model: config.model.model.clone(),
            temperature: config.model.temperature,
            result_count: config.model.result_count,
            cache_format_issues: config.search.cache_format_issues,
        }
    }
}

pub struct SearchService {
    backend: Arc<dyn CompletionBackend>,
    cache: Arc<ResultCache>,
    settings: SearchSettings,
}

impl SearchService {
    #[must_use]
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        cache: Arc<ResultCache>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            backend,
            cache,
            settings,
        }
    }

    #[must_use]
    pub const fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    pub async fn resolve(&self, query: &str) -> Result<PlaceResults, SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let key = cache_key(query);

        if let Some(results) = self.cache.get(&key) {
            debug!(key = %key, count = results.len(), "Serving search from cache");
            metrics::counter!("search_cache_hits_total").increment(1);
            return Ok(results);
        }
        metrics::counter!("search_cache_misses_total").increment(1);

        if !self.backend.has_credentials() {
            error!("Model API key is missing");
            return Err(SearchError::MissingCredentials);
        }

        let request = self.build_request(query);

        info!(model = %request.model, "Querying model for places");
        metrics::counter!("search_model_calls_total").increment(1);

        let content = self.backend.complete(&request).await?;
        let text = content.as_deref().unwrap_or(EMPTY_ANSWER);

        let parsed: serde_json::Value = serde_json::from_str(text).map_err(|e| {
            error!(error = %e, "Failed to parse search results");
            SearchError::MalformedResponse(e)
        })?;

        let shape = classify(parsed);
        let recognized = shape.is_recognized();
        debug!(shape = shape.label(), "Classified model answer");

        let results = shape.into_results();

        if recognized {
            self.cache.put(&key, results.clone());
        } else {
            warn!(key = %key, "Model answer had no usable result list");
            metrics::counter!("search_format_issues_total").increment(1);
            if self.settings.cache_format_issues {
                self.cache.put(&key, results.clone());
            }
        }

        Ok(results)
    }

    fn build_request(&self, query: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt(self.settings.result_count)),
                ChatMessage::user(query),
            ],
            temperature: self.settings.temperature,
        }
    }
}
