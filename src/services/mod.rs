pub mod cache;
pub use cache::{ResultCache, cache_key};

pub mod normalize;
pub use normalize::{ResponseShape, classify};

pub mod prompt;

pub mod rate_limiter;
pub use rate_limiter::RateLimiter;

pub mod search;
pub use search::{SearchError, SearchService, SearchSettings};
