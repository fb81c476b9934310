use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::http::HttpClient;
use crate::models::{Product, ScrapingResult};
use crate::parser::ProductParser;
use crate::units::{UnitCode, UnitDocumentParser};
use crate::url_builder::UrlBuilder;
use crate::utils::error::ScraperError;

/// Composes URL building, retrieval and parsing into scrape calls that
/// report failures through `ScrapingResult` instead of returning errors.
/// Collaborators are injected at construction; vendor variants differ only
/// in the builder and parser they pass in.
pub struct PriceScraper {
    client: HttpClient,
    url_builder: Box<dyn UrlBuilder>,
    parser: Box<dyn ProductParser>,
    unit_parser: UnitDocumentParser,
    request_timeout: Duration,
    // One detail-page fetch per distinct URL for this scraper's lifetime;
    // negative outcomes are remembered too.
    unit_cache: Mutex<HashMap<String, Option<UnitCode>>>,
}

impl PriceScraper {
    pub fn new(
        client: HttpClient,
        url_builder: Box<dyn UrlBuilder>,
        parser: Box<dyn ProductParser>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            client,
            url_builder,
            parser,
            unit_parser: UnitDocumentParser::default(),
            request_timeout,
            unit_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Scrapes one result page. Every failure, known or not, comes back as
    /// an unsuccessful `ScrapingResult`; this method does not fail.
    pub fn scrape_products(&self, keyword: &str, sort_by_price: bool, page: i32) -> ScrapingResult {
        let url = match self.url_builder.build_search_url(keyword, sort_by_price, page) {
            Ok(url) => url,
            Err(e) => {
                error!(keyword, "URL building failed: {e}");
                return ScrapingResult::failure(e.to_string(), None);
            }
        };

        let html = match self.client.get(&url, self.request_timeout) {
            Ok(html) => html,
            Err(e) => {
                error!(%url, "retrieval failed: {e}");
                return ScrapingResult::failure(e.to_string(), Some(url));
            }
        };

        match self.parser.parse_products(&html) {
            Ok(products) => {
                info!(count = products.len(), keyword, "scrape succeeded");
                ScrapingResult::success(products, url)
            }
            Err(e @ ScraperError::Parse(_)) => {
                error!(%url, "parsing failed: {e}");
                ScrapingResult::failure(e.to_string(), Some(url))
            }
            Err(e) => {
                error!(%url, "scrape failed: {e}");
                ScrapingResult::failure(format!("Unexpected error: {e}"), Some(url))
            }
        }
    }

    /// Detail view of one product; `None` on any failure.
    pub fn scrape_product_details(&self, product_url: &str) -> Option<Product> {
        let html = match self.client.get(product_url, self.request_timeout) {
            Ok(html) => html,
            Err(e) => {
                warn!(product_url, "failed to fetch product details: {e}");
                return None;
            }
        };

        match self.parser.parse_product_details(&html, product_url) {
            Ok(Some(product)) => Some(product),
            Ok(None) => {
                warn!("parser does not support detail-page parsing");
                None
            }
            Err(e) => {
                warn!(product_url, "failed to parse product details: {e}");
                None
            }
        }
    }

    /// Fills in missing units by visiting each product's detail page.
    /// Lookups are cached by URL and a failed fetch leaves the product as
    /// it was.
    pub fn enrich_units(&self, products: Vec<Product>) -> Vec<Product> {
        products
            .into_iter()
            .map(|product| {
                if product.unit.is_some() || product.url.is_empty() {
                    return product;
                }
                match self.lookup_unit(&product.url) {
                    Some(unit) => product.with_unit(unit),
                    None => product,
                }
            })
            .collect()
    }

    fn lookup_unit(&self, url: &str) -> Option<UnitCode> {
        if let Some(cached) = self.lock_cache().get(url) {
            return *cached;
        }

        let unit = match self.client.get(url, self.request_timeout) {
            Ok(html) => self.unit_parser.parse_unit(&html),
            Err(e) => {
                warn!(url, "unit enrichment fetch failed: {e}");
                None
            }
        };

        self.lock_cache().insert(url.to_string(), unit);
        unit
    }

    /// Scrapes each keyword in turn over the shared client (and therefore
    /// one browser session when the transport is browser-backed). One
    /// keyword's failure is logged and skipped; the rest of the batch goes
    /// on.
    pub fn scrape_batch(&self, keywords: &[&str], sort_by_price: bool) -> Vec<Product> {
        let mut all_products = Vec::new();
        for keyword in keywords {
            let result = self.scrape_products(keyword, sort_by_price, 0);
            if result.success {
                all_products.extend(result.products);
            } else {
                warn!(
                    %keyword,
                    error = result.error_message.as_deref().unwrap_or("unknown"),
                    "skipping keyword after failed scrape"
                );
            }
        }
        all_products
    }

    fn lock_cache(&self) -> MutexGuard<'_, HashMap<String, Option<UnitCode>>> {
        match self.unit_cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
