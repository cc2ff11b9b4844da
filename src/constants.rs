pub mod cache {
    use std::time::Duration;

    pub const RESULT_TTL: Duration = Duration::from_secs(60 * 60);
}

pub mod limits {
    use std::time::Duration;

    pub const RATE_LIMIT: u32 = 10;

    pub const RATE_WINDOW: Duration = Duration::from_secs(60);

    /// Bucket shared by every caller that sends no forwarded address.
    pub const UNKNOWN_CALLER: &str = "unknown";
}

pub mod model {

    pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

    pub const DEFAULT_MODEL: &str = "gpt-4o-mini-2024-07-18";

    pub const DEFAULT_TEMPERATURE: f32 = 0.7;

    pub const DEFAULT_RESULT_COUNT: usize = 7;
}

pub mod messages {

    pub const RATE_LIMITED: &str = "Rate limit exceeded. Please try again later.";

    pub const CONFIGURATION: &str = "API configuration error";

    pub const PARSE_FAILED: &str = "Failed to parse search results";

    pub const PROCESSING_FAILED: &str = "Failed to process search request";
}
