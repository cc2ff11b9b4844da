use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::constants;

/// Environment variable holding the model API credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub model: ModelConfig,

    pub search: SearchConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human readable format
    pub json_logs: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            worker_threads: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,

    pub bind_address: String,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,

    /// Header carrying the caller address used as the rate-limit bucket.
    /// It is taken verbatim and is not verified.
    pub forwarded_header: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            cors_allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            forwarded_header: "x-forwarded-for".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Base URL of an OpenAI compatible API (without `/chat/completions`)
    pub base_url: String,

    pub model: String,

    pub temperature: f32,

    /// Number of places the instruction prompt asks for
    pub result_count: usize,

    /// Prefer the `OPENAI_API_KEY` environment variable; this field is a fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds. Unset means the call waits indefinitely.
    pub request_timeout_seconds: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: constants::model::DEFAULT_BASE_URL.to_string(),
            model: constants::model::DEFAULT_MODEL.to_string(),
            temperature: constants::model::DEFAULT_TEMPERATURE,
            result_count: constants::model::DEFAULT_RESULT_COUNT,
            api_key: None,
            request_timeout_seconds: None,
        }
    }
}

impl ModelConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum requests per caller per window
    pub rate_limit: u32,

    pub rate_window_seconds: u64,

    pub cache_ttl_seconds: u64,

    /// Cache the "Response Format Issue" placeholder like a normal result.
    /// When false a query whose answer could not be interpreted is retried
    /// against the model on the next request.
    pub cache_format_issues: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            rate_limit: constants::limits::RATE_LIMIT,
            rate_window_seconds: constants::limits::RATE_WINDOW.as_secs(),
            cache_ttl_seconds: constants::cache::RESULT_TTL.as_secs(),
            cache_format_issues: false,
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub const fn rate_window(&self) -> Duration {
        Duration::from_secs(self.rate_window_seconds)
    }

    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            model: ModelConfig::default(),
            search: SearchConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    /// Loads the first config file found on the search path (or defaults),
    /// then overlays the API key from the environment.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut config = Self::load_file()?;
        config.apply_env(std::env::var(API_KEY_ENV).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// An environment credential wins over the config file; blank values are ignored.
    pub fn apply_env(&mut self, api_key: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.model.api_key = Some(key);
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("placefinder").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".placefinder").join("config.toml"));
        }

        paths
    }

    #[must_use]
    pub fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    /// Writes the defaults to `path` unless something is already there. The
    /// existing file is never read, so a broken one does not get in the way.
    pub fn create_default_at(path: &Path) -> Result<bool> {
        if path.exists() {
            Ok(false)
        } else {
            // Never write a credential picked up from the environment.
            let config = Self::default();
            config.save_to_path(path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.rate_limit == 0 {
            anyhow::bail!("search.rate_limit must be > 0");
        }

        if self.search.rate_window_seconds == 0 {
            anyhow::bail!("search.rate_window_seconds must be > 0");
        }

        if self.search.cache_ttl_seconds == 0 {
            anyhow::bail!("search.cache_ttl_seconds must be > 0");
        }

        if self.model.model.trim().is_empty() {
            anyhow::bail!("model.model cannot be empty");
        }

        if !(0.0..=2.0).contains(&self.model.temperature) {
            anyhow::bail!("model.temperature must be between 0.0 and 2.0");
        }

        url::Url::parse(&self.model.base_url)
            .with_context(|| format!("Invalid model.base_url: {}", self.model.base_url))?;

        Ok(())
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.model
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.search.rate_limit, 10);
        assert_eq!(config.search.rate_window_seconds, 60);
        assert_eq!(config.search.cache_ttl_seconds, 3600);
        assert!(!config.search.cache_format_issues);
        assert_eq!(config.model.model, "gpt-4o-mini-2024-07-18");
        assert_eq!(config.model.result_count, 7);
        assert!(config.model.request_timeout().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[model]"));
        assert!(toml_str.contains("[search]"));
        assert!(!toml_str.contains("api_key"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [search]
            rate_limit = 3
            cache_format_issues = true
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.search.rate_limit, 3);
        assert!(config.search.cache_format_issues);

        assert_eq!(config.search.rate_window_seconds, 60);
        assert_eq!(config.server.forwarded_header, "x-forwarded-for");
    }

    #[test]
    fn test_env_key_overrides_file() {
        let mut config = Config::default();
        config.model.api_key = Some("from-file".to_string());

        config.apply_env(Some("from-env".to_string()));
        assert_eq!(config.model.api_key.as_deref(), Some("from-env"));

        config.apply_env(Some("   ".to_string()));
        assert_eq!(config.model.api_key.as_deref(), Some("from-env"));

        config.apply_env(None);
        assert!(config.has_api_key());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.search.rate_limit = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.model.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.model.temperature = 3.5;
        assert!(config.validate().is_err());
    }
}
