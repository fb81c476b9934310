// Integration tests for the scraping engine: the orchestrator wired to
// scripted transports, exercising the failure paths vendors rely on.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use harga_scraper::config::HttpConfig;
use harga_scraper::http::{HttpClient, Transport};
use harga_scraper::parser::{HtmlProductParser, ProductSelectors};
use harga_scraper::price::PriceCleaner;
use harga_scraper::scraper::PriceScraper;
use harga_scraper::units::UnitExtractor;
use harga_scraper::url_builder::SearchUrlBuilder;
use harga_scraper::{Product, ScraperError, UnitCode};

enum Scripted {
    Body(&'static str),
    Fail(&'static str),
}

/// Replays a fixed sequence of responses and counts every fetch.
struct ScriptedTransport {
    responses: Mutex<VecDeque<Scripted>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedTransport {
    fn new(responses: Vec<Scripted>, calls: Arc<AtomicUsize>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls,
        }
    }
}

impl Transport for ScriptedTransport {
    fn fetch(&self, url: &str, _timeout: Duration) -> Result<String, ScraperError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .responses
            .lock()
            .expect("scripted responses poisoned")
            .pop_front();
        match next {
            Some(Scripted::Body(body)) => Ok(body.to_string()),
            Some(Scripted::Fail(message)) => {
                Err(ScraperError::Retrieval(format!("{message}: {url}")))
            }
            None => Err(ScraperError::Retrieval(format!("No scripted response for {url}"))),
        }
    }
}

const LISTING_SEMEN: &str = r#"
    <html><body>
        <div class="item-product">
            <a href="https://toko.example.com/p/semen-instan">
                <p class="product-name">Semen Instan 50kg</p>
            </a>
            <p class="price">Rp 62.500</p>
        </div>
        <div class="item-product">
            <a href="https://toko.example.com/p/semen-putih">
                <p class="product-name">Semen Putih 40 sak</p>
            </a>
            <p class="price">Rp 85.000</p>
        </div>
    </body></html>
"#;

const LISTING_KERAMIK: &str = r#"
    <html><body>
        <div class="item-product">
            <a href="https://toko.example.com/p/keramik-60">
                <p class="product-name">Keramik 60 x 60 cm</p>
            </a>
            <p class="price">Rp 150.000</p>
        </div>
    </body></html>
"#;

const LISTING_NO_UNIT: &str = r#"
    <html><body>
        <div class="item-product">
            <a href="https://toko.example.com/p/obeng">
                <p class="product-name">Obeng Plus Murah</p>
            </a>
            <p class="price">Rp 15.000</p>
        </div>
    </body></html>
"#;

const DETAIL_WITH_SPEC: &str = r#"
    <html><body>
        <table>
            <tr><td>Merek</td><td>Tukang Pro</td></tr>
            <tr><td>Berat</td><td>0.2 kg</td></tr>
        </table>
    </body></html>
"#;

fn fast_config(max_retries: u32) -> HttpConfig {
    HttpConfig {
        max_retries,
        retry_delay_ms: 1,
        min_request_interval_ms: 0,
        ..HttpConfig::default()
    }
}

fn listing_selectors() -> ProductSelectors {
    ProductSelectors {
        item: "div.item-product".to_string(),
        name: vec!["p.product-name".to_string()],
        price: vec!["p.price".to_string()],
        link: Some("a".to_string()),
    }
}

fn scraper_with(responses: Vec<Scripted>, max_retries: u32, calls: Arc<AtomicUsize>) -> PriceScraper {
    let transport = Box::new(ScriptedTransport::new(responses, calls));
    let client = HttpClient::new(transport, &fast_config(max_retries));
    let url_builder = Box::new(SearchUrlBuilder::new(
        "https://toko.example.com",
        "/shop/search",
    ));
    let parser = Box::new(
        HtmlProductParser::new(listing_selectors(), PriceCleaner::new(), UnitExtractor::new())
            .expect("listing selectors compile"),
    );
    PriceScraper::new(client, url_builder, parser, Duration::from_secs(5))
}

#[test]
fn test_scrape_products_end_to_end() {
    let scraper = scraper_with(
        vec![Scripted::Body(LISTING_SEMEN)],
        1,
        Arc::new(AtomicUsize::new(0)),
    );

    let result = scraper.scrape_products("semen", true, 0);
    assert!(result.success);
    assert_eq!(result.len(), 2);
    assert_eq!(
        result.url.as_deref(),
        Some("https://toko.example.com/shop/search?keyword=semen&page=0&sort=price_asc")
    );

    assert_eq!(result.products[0].price, 62_500);
    assert_eq!(result.products[0].unit, Some(UnitCode::Kg));
    assert_eq!(result.products[1].unit, Some(UnitCode::Sak));
}

#[test]
fn test_scrape_products_reports_url_builder_failure() {
    let scraper = scraper_with(vec![], 1, Arc::new(AtomicUsize::new(0)));

    let result = scraper.scrape_products("   ", true, 0);
    assert!(!result.success);
    assert!(result.is_empty());
    assert!(result.url.is_none());
    assert!(
        result
            .error_message
            .as_deref()
            .unwrap()
            .contains("Keyword cannot be empty")
    );

    let result = scraper.scrape_products("semen", true, -1);
    assert!(!result.success);
    assert!(result.error_message.as_deref().unwrap().contains("negative"));
}

#[test]
fn test_scrape_products_reports_retrieval_failure() {
    let scraper = scraper_with(
        vec![Scripted::Fail("Connection error")],
        1,
        Arc::new(AtomicUsize::new(0)),
    );

    let result = scraper.scrape_products("semen", true, 0);
    assert!(!result.success);
    assert!(result.is_empty());
    assert!(result.url.is_some());
    assert!(
        result
            .error_message
            .as_deref()
            .unwrap()
            .contains("Connection error")
    );
}

#[test]
fn test_retry_exhaustion_counts_attempts() {
    let calls = Arc::new(AtomicUsize::new(0));
    let scraper = scraper_with(
        vec![
            Scripted::Fail("Connection error"),
            Scripted::Fail("Connection error"),
            Scripted::Fail("Connection error"),
        ],
        3,
        Arc::clone(&calls),
    );

    let result = scraper.scrape_products("semen", true, 0);
    assert!(!result.success);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_batch_survives_one_failing_keyword() {
    let calls = Arc::new(AtomicUsize::new(0));
    let scraper = scraper_with(
        vec![
            Scripted::Body(LISTING_SEMEN),
            Scripted::Fail("Connection error"),
            Scripted::Body(LISTING_KERAMIK),
        ],
        1,
        Arc::clone(&calls),
    );

    let products = scraper.scrape_batch(&["semen", "cat", "keramik"], true);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(products.len(), 3);

    let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
    assert!(names.contains(&"Semen Instan 50kg"));
    assert!(names.contains(&"Keramik 60 x 60 cm"));
}

#[test]
fn test_enrichment_fetches_each_url_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let scraper = scraper_with(
        vec![Scripted::Body(DETAIL_WITH_SPEC)],
        1,
        Arc::clone(&calls),
    );

    let product = Product::new("Obeng Plus Murah", 15_000, "https://toko.example.com/p/obeng");

    let enriched = scraper.enrich_units(vec![product.clone()]);
    assert_eq!(enriched[0].unit, Some(UnitCode::Kg));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Second pass hits the cache, not the transport.
    let enriched = scraper.enrich_units(vec![product]);
    assert_eq!(enriched[0].unit, Some(UnitCode::Kg));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_enrichment_swallows_fetch_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let scraper = scraper_with(
        vec![Scripted::Fail("Connection error")],
        1,
        Arc::clone(&calls),
    );

    let product = Product::new("Obeng Plus Murah", 15_000, "https://toko.example.com/p/obeng");

    let enriched = scraper.enrich_units(vec![product.clone()]);
    assert!(enriched[0].unit.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Negative outcomes are cached too; no second fetch.
    let enriched = scraper.enrich_units(vec![product]);
    assert!(enriched[0].unit.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_enrichment_keeps_existing_units() {
    let calls = Arc::new(AtomicUsize::new(0));
    let scraper = scraper_with(vec![], 1, Arc::clone(&calls));

    let product = Product::new("Keramik 60 x 60 cm", 150_000, "https://toko.example.com/p/k")
        .with_unit(UnitCode::Cm2);
    let enriched = scraper.enrich_units(vec![product]);

    assert_eq!(enriched[0].unit, Some(UnitCode::Cm2));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_scrape_then_enrich_workflow() {
    let calls = Arc::new(AtomicUsize::new(0));
    let scraper = scraper_with(
        vec![
            Scripted::Body(LISTING_NO_UNIT),
            Scripted::Body(DETAIL_WITH_SPEC),
        ],
        1,
        Arc::clone(&calls),
    );

    let result = scraper.scrape_products("obeng", false, 0);
    assert!(result.success);
    assert!(result.products[0].unit.is_none());

    let enriched = scraper.enrich_units(result.products);
    assert_eq!(enriched[0].unit, Some(UnitCode::Kg));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_detail_parsing_defaults_to_none() {
    let scraper = scraper_with(
        vec![Scripted::Body(DETAIL_WITH_SPEC)],
        1,
        Arc::new(AtomicUsize::new(0)),
    );

    // HtmlProductParser only understands listings.
    assert!(
        scraper
            .scrape_product_details("https://toko.example.com/p/obeng")
            .is_none()
    );
}
