use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("URL builder error: {0}")]
    UrlBuilder(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ScraperError>;
