use tracing::debug;
use url::Url;

use crate::utils::error::{Result, ScraperError};

/// Builds vendor search URLs. Implementors supply the endpoint and the
/// query-parameter scheme; keyword validation, URL joining and
/// percent-encoding are shared.
pub trait UrlBuilder: Send + Sync {
    fn base_url(&self) -> &str;

    fn search_path(&self) -> &str;

    /// Query parameters for one search request. Called with a trimmed
    /// keyword and a page that is already known to be non-negative. Vendors
    /// override this for their pagination encoding, sort tokens and filters.
    fn build_params(&self, keyword: &str, sort_by_price: bool, page: i32) -> Vec<(String, String)>;

    fn build_search_url(&self, keyword: &str, sort_by_price: bool, page: i32) -> Result<String> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(ScraperError::UrlBuilder("Keyword cannot be empty".into()));
        }
        if page < 0 {
            return Err(ScraperError::UrlBuilder("Page number cannot be negative".into()));
        }

        let base = Url::parse(self.base_url()).map_err(|e| {
            ScraperError::UrlBuilder(format!("Invalid base URL {}: {e}", self.base_url()))
        })?;
        let mut url = base.join(self.search_path()).map_err(|e| {
            ScraperError::UrlBuilder(format!(
                "Failed to join search path {}: {e}",
                self.search_path()
            ))
        })?;
        url.query_pairs_mut()
            .extend_pairs(self.build_params(keyword, sort_by_price, page));

        let url = url.to_string();
        debug!(%url, "built search URL");
        Ok(url)
    }
}

/// Generic builder: `keyword` and `page` parameters plus a price-ascending
/// sort token. Vendors with their own parameter scheme implement
/// `UrlBuilder` directly instead.
pub struct SearchUrlBuilder {
    base_url: String,
    search_path: String,
}

impl SearchUrlBuilder {
    pub fn new(base_url: impl Into<String>, search_path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            search_path: search_path.into(),
        }
    }
}

impl UrlBuilder for SearchUrlBuilder {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_path(&self) -> &str {
        &self.search_path
    }

    fn build_params(&self, keyword: &str, sort_by_price: bool, page: i32) -> Vec<(String, String)> {
        let mut params = vec![
            ("keyword".to_string(), keyword.to_string()),
            ("page".to_string(), page.to_string()),
        ];
        if sort_by_price {
            params.push(("sort".to_string(), "price_asc".to_string()));
        }
        params
    }
}
