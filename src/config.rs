use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    pub request_timeout: u64,
    /// Attempts per `get`, including the first one.
    pub max_retries: u32,
    /// Fixed sleep between attempts; no exponential backoff.
    pub retry_delay_ms: u64,
    /// Rate-limit floor between successive requests from one client.
    pub min_request_interval_ms: u64,
    pub user_agent: String,
    pub chrome_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub log_requests: bool,
}

impl ScraperConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let s = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Add local config (ignored by git)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with prefix "HARGA"
            .add_source(Environment::with_prefix("HARGA").separator("__"))
            .build()?;

        let mut config: ScraperConfig = s.try_deserialize()?;

        // Add Chrome path from environment if not set
        if config.http.chrome_path.is_none() {
            config.http.chrome_path = env::var("CHROME_PATH").ok();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.request_timeout == 0 {
            return Err(ConfigError::Message(
                "http.request_timeout must be greater than 0".into(),
            ));
        }

        if self.http.max_retries == 0 {
            return Err(ConfigError::Message(
                "http.max_retries must be greater than 0".into(),
            ));
        }

        if self.http.user_agent.trim().is_empty() {
            return Err(ConfigError::Message("http.user_agent must be set".into()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Message(
                "logging.level must be one of trace, debug, info, warn, error".into(),
            ));
        }

        Ok(())
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                log_requests: true,
            },
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: 30,
            max_retries: 3,
            retry_delay_ms: 1000,
            min_request_interval_ms: 1000,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            chrome_path: None,
        }
    }
}
