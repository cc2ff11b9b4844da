use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::models::PlaceResults;

/// Cache key for a raw query: surrounding whitespace trimmed, lowercased.
#[must_use]
pub fn cache_key(query: &str) -> String {
    query.trim().to_lowercase()
}

#[derive(Debug, Clone)]
struct CacheEntry {
    results: PlaceResults,
    created_at: Instant,
}

/// In-memory result cache with a fixed time-to-live.
///
/// Entries are never evicted by size; stale entries are simply ignored on
/// read and overwritten by the next `put`.
#[derive(Debug)]
pub struct ResultCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResultCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<PlaceResults> {
        self.get_at(key, Instant::now())
    }

    #[must_use]
    pub fn get_at(&self, key: &str, now: Instant) -> Option<PlaceResults> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(key)?;

        if now.saturating_duration_since(entry.created_at) >= self.ttl {
            return None;
        }

        Some(entry.results.clone())
    }

    pub fn put(&self, key: &str, results: PlaceResults) {
        self.put_at(key, results, Instant::now());
    }

    pub fn put_at(&self, key: &str, results: PlaceResults, now: Instant) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                key.to_string(),
                CacheEntry {
                    results,
                    created_at: now,
                },
            );
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const HOUR: Duration = Duration::from_secs(60 * 60);

    #[test]
    fn test_cache_key_normalization() {
        assert_eq!(cache_key("Paris Cafes"), "paris cafes");
        assert_eq!(cache_key(" paris cafes "), "paris cafes");
        assert_eq!(cache_key("PARIS CAFES"), "paris cafes");
        assert_eq!(cache_key("\tParis  Cafes\n"), "paris  cafes");
    }

    #[test]
    fn test_get_within_ttl() {
        let cache = ResultCache::new(HOUR);
        let now = Instant::now();
        cache.put_at("paris cafes", vec![json!({"title": "Cafe de Flore"})], now);

        let hit = cache.get_at("paris cafes", now + HOUR - Duration::from_secs(1));
        assert_eq!(hit.unwrap()[0]["title"], "Cafe de Flore");
        assert!(cache.get_at("other", now).is_none());
    }

    #[test]
    fn test_entry_expires_at_ttl() {
        let cache = ResultCache::new(HOUR);
        let now = Instant::now();
        cache.put_at("k", vec![json!(1)], now);

        assert!(cache.get_at("k", now + HOUR).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_overwrites_and_refreshes_timestamp() {
        let cache = ResultCache::new(HOUR);
        let start = Instant::now();
        cache.put_at("k", vec![json!("old")], start);

        let later = start + Duration::from_secs(50 * 60);
        cache.put_at("k", vec![json!("new")], later);

        let hit = cache.get_at("k", start + HOUR + Duration::from_secs(60));
        assert_eq!(hit, Some(vec![json!("new")]));
    }

    #[test]
    fn test_empty_results_are_cacheable() {
        let cache = ResultCache::new(HOUR);
        assert!(cache.is_empty());
        cache.put("nothing", Vec::new());
        assert_eq!(cache.get("nothing"), Some(Vec::new()));
    }
}
