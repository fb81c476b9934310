use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::models::Product;
use crate::price::PriceCleaner;
use crate::units::UnitExtractor;
use crate::utils::error::{Result, ScraperError};

/// Turns a result page into products.
pub trait ProductParser: Send + Sync {
    fn parse_products(&self, html: &str) -> Result<Vec<Product>>;

    /// Detail-page parsing is optional; parsers that only understand
    /// listings report `None`.
    fn parse_product_details(&self, html: &str, product_url: &str) -> Result<Option<Product>> {
        let _ = (html, product_url);
        Ok(None)
    }
}

/// CSS selector set a vendor integration supplies to the generic parser.
#[derive(Debug, Clone)]
pub struct ProductSelectors {
    /// Matches one product card in the listing.
    pub item: String,
    /// Tried in order until one yields a non-empty name; an image `alt`
    /// attribute is the final fallback.
    pub name: Vec<String>,
    /// Tried in order until one yields a valid price.
    pub price: Vec<String>,
    /// Anchor carrying the product URL; any `<a href>` is the fallback.
    pub link: Option<String>,
}

#[derive(Debug)]
struct CompiledSelectors {
    item: Selector,
    name: Vec<Selector>,
    price: Vec<Selector>,
    link: Option<Selector>,
    anchor: Selector,
    image: Selector,
}

/// Generic listing parser: vendors choose the selectors, the engine runs
/// the extraction loop, price cleaning and name-based unit extraction. One
/// malformed card is skipped without discarding the rest of the page.
#[derive(Debug)]
pub struct HtmlProductParser {
    selectors: CompiledSelectors,
    price_cleaner: PriceCleaner,
    unit_extractor: UnitExtractor,
}

impl HtmlProductParser {
    pub fn new(
        selectors: ProductSelectors,
        price_cleaner: PriceCleaner,
        unit_extractor: UnitExtractor,
    ) -> Result<Self> {
        Ok(Self {
            selectors: compile_selectors(&selectors)?,
            price_cleaner,
            unit_extractor,
        })
    }

    fn extract_product(&self, item: &ElementRef<'_>) -> Option<Product> {
        let name = self.extract_name(item)?;

        let price = self.extract_price(item);
        if !self.price_cleaner.is_valid_price(price) {
            debug!(%name, price, "skipping product without a valid price");
            return None;
        }

        let url = self.extract_url(item);
        let mut product = Product::new(name, price, url);
        if let Some(unit) = self.unit_extractor.extract_unit(&product.name) {
            product = product.with_unit(unit);
        }
        Some(product)
    }

    fn extract_name(&self, item: &ElementRef<'_>) -> Option<String> {
        for selector in &self.selectors.name {
            if let Some(element) = item.select(selector).next() {
                let name = element_text(&element);
                if !name.is_empty() {
                    return Some(name);
                }
            }
        }

        item.select(&self.selectors.image)
            .filter_map(|image| image.value().attr("alt"))
            .map(str::trim)
            .find(|alt| !alt.is_empty())
            .map(String::from)
    }

    fn extract_price(&self, item: &ElementRef<'_>) -> u64 {
        for selector in &self.selectors.price {
            for element in item.select(selector) {
                let price = self.price_cleaner.clean_price(&element_text(&element));
                if self.price_cleaner.is_valid_price(price) {
                    return price;
                }
            }
        }

        // Last resort: any text node mentioning the currency marker.
        for segment in item.text() {
            if segment.contains("Rp") {
                let price = self.price_cleaner.clean_price(segment);
                if self.price_cleaner.is_valid_price(price) {
                    return price;
                }
            }
        }
        0
    }

    fn extract_url(&self, item: &ElementRef<'_>) -> String {
        let selector = self.selectors.link.as_ref().unwrap_or(&self.selectors.anchor);
        item.select(selector)
            .filter_map(|anchor| anchor.value().attr("href"))
            .find(|href| !href.is_empty())
            .unwrap_or_default()
            .to_string()
    }
}

impl ProductParser for HtmlProductParser {
    fn parse_products(&self, html: &str) -> Result<Vec<Product>> {
        if html.trim().is_empty() {
            return Ok(Vec::new());
        }

        let document = Html::parse_document(html);
        let items: Vec<ElementRef<'_>> = document.select(&self.selectors.item).collect();
        info!(candidates = items.len(), "found product items in listing");

        let mut products = Vec::new();
        for item in &items {
            match self.extract_product(item) {
                Some(product) => products.push(product),
                None => debug!("skipping listing item without usable name or price"),
            }
        }

        info!(count = products.len(), "parsed products");
        Ok(products)
    }
}

fn compile_selectors(selectors: &ProductSelectors) -> Result<CompiledSelectors> {
    Ok(CompiledSelectors {
        item: compile(&selectors.item)?,
        name: selectors.name.iter().map(|s| compile(s)).collect::<Result<_>>()?,
        price: selectors.price.iter().map(|s| compile(s)).collect::<Result<_>>()?,
        link: selectors.link.as_deref().map(compile).transpose()?,
        anchor: compile("a[href]")?,
        image: compile("img")?,
    })
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| ScraperError::Parse(format!("Invalid CSS selector '{selector}': {e:?}")))
}

fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
