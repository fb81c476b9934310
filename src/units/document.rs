use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use super::code::UnitCode;
use super::extract::UnitExtractor;

/// Label keywords that mark a table row, span or div as a specification
/// value worth scanning (Indonesian first, English fallbacks).
const SPEC_KEYWORDS: &[&str] = &[
    "ukuran", "dimensi", "size", "dimension", "spesifikasi", "specification",
    "berat", "weight", "kapasitas", "capacity", "daya", "power", "tegangan",
    "voltage", "diameter", "panjang", "length", "lebar", "width", "tinggi",
    "height", "tebal", "thickness", "volume", "isi", "content",
];

const SPEC_CLASS_HINTS: &[&str] = &["spec", "detail", "info", "description"];

/// Runs the unit extractor over a product detail page: specification
/// label/value pairs first, full visible text as the fallback.
#[derive(Debug)]
pub struct UnitDocumentParser {
    extractor: UnitExtractor,
    rows: Option<Selector>,
    cells: Option<Selector>,
    spans: Option<Selector>,
    divs: Option<Selector>,
}

impl UnitDocumentParser {
    pub fn new(extractor: UnitExtractor) -> Self {
        Self {
            extractor,
            rows: parse_selector("table tr"),
            cells: parse_selector("td, th"),
            spans: parse_selector("span"),
            divs: parse_selector("div"),
        }
    }

    /// Never fails; a page without a recognizable unit comes back as `None`.
    pub fn parse_unit(&self, html: &str) -> Option<UnitCode> {
        if html.trim().is_empty() {
            return None;
        }
        let document = Html::parse_document(html);

        let mut found = Vec::new();
        for spec in self.specification_values(&document) {
            if let Some(unit) = self.extractor.extract_unit(&spec) {
                found.push(unit);
            }
        }
        if let Some(unit) = resolve_priority(&found) {
            return Some(unit);
        }

        let full_text = element_text(&document.root_element());
        self.extractor.extract_unit(&full_text)
    }

    /// Specification values in document order: table rows whose label cell
    /// carries a spec keyword, spans mentioning a keyword, and divs whose
    /// class names look specification-like.
    fn specification_values(&self, document: &Html) -> Vec<String> {
        let mut specs = Vec::new();

        if let (Some(rows), Some(cells)) = (&self.rows, &self.cells) {
            for row in document.select(rows) {
                if let Some(value) = spec_from_row(&row, cells) {
                    specs.push(value);
                }
            }
        }

        if let Some(spans) = &self.spans {
            for span in document.select(spans) {
                let text = element_text(&span);
                if !text.is_empty() && contains_spec_keyword(&text) {
                    specs.push(text);
                }
            }
        }

        if let Some(divs) = &self.divs {
            for div in document.select(divs) {
                if !class_looks_like_spec(&div) {
                    continue;
                }
                let text = element_text(&div);
                if !text.is_empty() {
                    specs.push(text);
                }
            }
        }

        specs
    }
}

impl Default for UnitDocumentParser {
    fn default() -> Self {
        Self::new(UnitExtractor::new())
    }
}

fn spec_from_row(row: &ElementRef<'_>, cells: &Selector) -> Option<String> {
    let mut cells = row.select(cells);
    let label = element_text(&cells.next()?).to_lowercase();
    let value = element_text(&cells.next()?);
    if !value.is_empty() && SPEC_KEYWORDS.iter().any(|keyword| label.contains(keyword)) {
        Some(value)
    } else {
        None
    }
}

fn contains_spec_keyword(text: &str) -> bool {
    let lowered = text.to_lowercase();
    SPEC_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

fn class_looks_like_spec(element: &ElementRef<'_>) -> bool {
    element
        .value()
        .attr("class")
        .map(|classes| {
            let lowered = classes.to_lowercase();
            SPEC_CLASS_HINTS.iter().any(|hint| lowered.contains(hint))
        })
        .unwrap_or(false)
}

/// Specification units are resolved area > volume > weight > first-found.
fn resolve_priority(found: &[UnitCode]) -> Option<UnitCode> {
    found
        .iter()
        .copied()
        .find(|unit| unit.is_area())
        .or_else(|| found.iter().copied().find(|unit| unit.is_volume()))
        .or_else(|| found.iter().copied().find(|unit| unit.is_weight()))
        .or_else(|| found.first().copied())
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

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(selector, "selector failed to parse: {e:?}");
            None
        }
    }
}
