use std::sync::Arc;

use crate::clients::{CompletionBackend, OpenAiClient};
use crate::config::Config;
use crate::services::{RateLimiter, ResultCache, SearchService, SearchSettings};

/// Process-wide state handed to every request. The limiter and cache each
/// guard their own map, so handlers can run in parallel.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub rate_limiter: Arc<RateLimiter>,

    pub cache: Arc<ResultCache>,

    pub search_service: Arc<SearchService>,
}

impl SharedState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let backend = Arc::new(OpenAiClient::from_config(&config.model)?);
        Ok(Self::with_backend(config, backend))
    }

    /// Builds the state around any completion backend.
    #[must_use]
    pub fn with_backend(config: Config, backend: Arc<dyn CompletionBackend>) -> Self {
        let rate_limiter = Arc::new(RateLimiter::new(
            config.search.rate_limit,
            config.search.rate_window(),
        ));
        let cache = Arc::new(ResultCache::new(config.search.cache_ttl()));

        let search_service = Arc::new(SearchService::new(
            backend,
            cache.clone(),
            SearchSettings::from(&config),
        ));

        Self {
            config: Arc::new(config),
            rate_limiter,
            cache,
            search_service,
        }
    }
}
