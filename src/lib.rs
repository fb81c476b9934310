pub mod config;
pub mod http;
pub mod models;
pub mod parser;
pub mod price;
pub mod scraper;
pub mod units;
pub mod url_builder;
pub mod utils;

// Re-export commonly used types
pub use crate::config::{HttpConfig, ScraperConfig};
pub use crate::models::{Product, ScrapingResult};
pub use crate::scraper::PriceScraper;
pub use crate::units::{UnitCode, UnitExtractor};
pub use crate::utils::error::ScraperError;

pub type Result<T> = std::result::Result<T, ScraperError>;
