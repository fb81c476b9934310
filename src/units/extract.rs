use regex::{Regex, RegexBuilder};
use tracing::warn;

use super::catalog::PatternCatalog;
use super::code::UnitCode;

/// Pattern scans are bounded for performance; listings occasionally inline
/// entire description blobs into a product name.
const DEFAULT_MAX_SCAN_CHARS: usize = 5000;

/// Matches dimension expressions like "60 x 60 cm" and maps them straight to
/// the corresponding area code. Runs before the priority walk because an
/// area expression also contains a bare length token that would otherwise
/// win as plain CM or M.
#[derive(Debug)]
struct AreaPatternStrategy {
    pattern: Option<Regex>,
}

impl AreaPatternStrategy {
    fn new() -> Self {
        let raw = r"(\d{1,10}(?:[.,]\d{1,10})?)\s?[x×]\s?(\d{1,10}(?:[.,]\d{1,10})?)\s?(cm|mm|m|inch)(?:\s|$)";
        let pattern = match RegexBuilder::new(raw).case_insensitive(true).build() {
            Ok(regex) => Some(regex),
            Err(e) => {
                warn!("area pattern failed to compile: {e}");
                None
            }
        };
        Self { pattern }
    }

    fn extract(&self, text: &str) -> Option<UnitCode> {
        let captures = self.pattern.as_ref()?.captures(text)?;
        match captures.get(3)?.as_str() {
            "cm" => Some(UnitCode::Cm2),
            "mm" => Some(UnitCode::Mm2),
            "m" => Some(UnitCode::M2),
            "inch" => Some(UnitCode::Inch2),
            _ => None,
        }
    }
}

/// Walks the catalog's priority order and returns the first unit with any
/// matching fragment.
#[derive(Debug)]
struct PriorityPatternStrategy {
    catalog: PatternCatalog,
}

impl PriorityPatternStrategy {
    fn new(catalog: PatternCatalog) -> Self {
        Self { catalog }
    }

    fn extract(&self, text: &str) -> Option<UnitCode> {
        for (unit, patterns) in self.catalog.entries() {
            if patterns.iter().any(|regex| regex.is_match(text)) {
                return Some(*unit);
            }
        }
        None
    }
}

/// Scans for a number immediately followed by a short unit token, diameter
/// notations ("Ø16 mm", "12 diameter cm"), sack and count words, and rental
/// durations. The captured token is looked up in the unit map; unknown
/// tokens are skipped so the scan keeps going.
#[derive(Debug)]
struct AdjacentPatternStrategy {
    patterns: Vec<Regex>,
}

const ADJACENT_PATTERNS: &[&str] = &[
    r"(\d{1,10}(?:[.,]\d{1,10})?)(mm|cm|kg|gr|ml|lt|pcs|set|inch|feet|watt|volt|amp|hp|bar|psi)(?:\s|$)",
    r"(\d{1,10}(?:[.,]\d{1,10})?)\s?diameter\s?(mm|cm|m|inch)",
    r"Ø\s?(\d{1,10}(?:[.,]\d{1,10})?)\s?(mm|cm|m|inch)",
    r"(\d{1,10}(?:[.,]\d{1,10})?)\s?/?\b(hari|minggu|bulan|tahun|jam|hour|day|week|month|year)\b",
    r"(\d{1,10}(?:[.,]\d{1,10})?)\s?(sak|karung|bag|zak)",
    r"(\d{1,10}(?:[.,]\d{1,10})?)\s?(roll|lembar|sheet|batang|papan)",
];

impl AdjacentPatternStrategy {
    fn new() -> Self {
        let mut patterns = Vec::with_capacity(ADJACENT_PATTERNS.len());
        for raw in ADJACENT_PATTERNS {
            match RegexBuilder::new(raw).case_insensitive(true).build() {
                Ok(regex) => patterns.push(regex),
                Err(e) => warn!(pattern = raw, "adjacent pattern failed to compile: {e}"),
            }
        }
        Self { patterns }
    }

    fn extract(&self, text: &str) -> Option<UnitCode> {
        for regex in &self.patterns {
            for captures in regex.captures_iter(text) {
                let token = match captures.get(captures.len() - 1) {
                    Some(token) => token.as_str(),
                    None => continue,
                };
                if let Some(unit) = map_token(token) {
                    return Some(unit);
                }
            }
        }
        None
    }
}

fn map_token(token: &str) -> Option<UnitCode> {
    use UnitCode::*;
    let unit = match token {
        "mm" => Mm,
        "cm" => Cm,
        "m" => M,
        "kg" => Kg,
        "gr" => Gram,
        "ml" => Ml,
        "lt" => Liter,
        "pcs" => Pcs,
        "set" => Set,
        "inch" => Inch,
        "feet" => Feet,
        "watt" => Watt,
        "volt" => Volt,
        "amp" => Ampere,
        "hp" => Hp,
        "bar" => Bar,
        "psi" => Psi,
        "hari" | "day" => Hari,
        "minggu" | "week" => Minggu,
        "bulan" | "month" => Bulan,
        "tahun" | "year" => Tahun,
        "jam" | "hour" => Jam,
        "sak" | "karung" | "bag" | "zak" => Sak,
        "roll" => Roll,
        "lembar" => Lembar,
        "sheet" => Sheet,
        "batang" => Batang,
        "papan" => Papan,
        _ => return None,
    };
    Some(unit)
}

/// Maps free text to a canonical unit code. Three strategies cascade in
/// fixed order and the first hit wins; every pattern table is compiled once
/// at construction.
#[derive(Debug)]
pub struct UnitExtractor {
    area: AreaPatternStrategy,
    priority: PriorityPatternStrategy,
    adjacent: AdjacentPatternStrategy,
    max_scan_chars: usize,
}

impl UnitExtractor {
    pub fn new() -> Self {
        Self::with_catalog(PatternCatalog::new())
    }

    pub fn with_catalog(catalog: PatternCatalog) -> Self {
        Self {
            area: AreaPatternStrategy::new(),
            priority: PriorityPatternStrategy::new(catalog),
            adjacent: AdjacentPatternStrategy::new(),
            max_scan_chars: DEFAULT_MAX_SCAN_CHARS,
        }
    }

    pub fn with_max_scan_chars(mut self, max_scan_chars: usize) -> Self {
        self.max_scan_chars = max_scan_chars;
        self
    }

    /// Never fails: unmatchable text comes back as `None`.
    pub fn extract_unit(&self, text: &str) -> Option<UnitCode> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let mut lowered = trimmed.to_lowercase();
        if let Some((cut, _)) = lowered.char_indices().nth(self.max_scan_chars) {
            warn!(cap = self.max_scan_chars, "text too long for unit extraction, truncating");
            lowered.truncate(cut);
        }

        self.area
            .extract(&lowered)
            .or_else(|| self.priority.extract(&lowered))
            .or_else(|| self.adjacent.extract(&lowered))
    }
}

impl Default for UnitExtractor {
    fn default() -> Self {
        Self::new()
    }
}
