use regex::{Regex, RegexBuilder};
use tracing::warn;

use super::code::UnitCode;

/// Regex fragments per unit, listed in the catalog's fixed priority order:
/// area > volume > weight > length > liquid > electrical > quantity > time >
/// pressure/speed. Walking this order resolves ties between units whose
/// tokens overlap (a bare "m" inside "m²", "l" inside "lb").
fn fragment_table() -> Vec<(UnitCode, Vec<&'static str>)> {
    use UnitCode::*;
    vec![
        // Area
        (M2, vec!["m²", "m2", "meter persegi", "square meter"]),
        (Cm2, vec!["cm²", "cm2", "centimeter persegi", "sentimeter persegi"]),
        (Inch2, vec!["inch²", "inch2", "square inch", "inchi persegi"]),
        (Mm2, vec!["mm²", "mm2", "milimeter persegi"]),
        // Volume
        (M3, vec!["m³", "m3", "meter kubik", "cubic meter"]),
        (Cm3, vec!["cm³", "cm3", "centimeter kubik", "cubic centimeter"]),
        // Weight
        (Kg, vec!["kg", "kilogram", "kilo"]),
        (Gram, vec!["gram", "gr", "g"]),
        (Ton, vec!["ton", "tonnes"]),
        (Pound, vec!["pound", "lb", "lbs", "pon"]),
        // Length
        (M, vec!["meter", "metre", "m"]),
        (Cm, vec!["cm", "centimeter", "sentimeter"]),
        (Mm, vec!["mm", "milimeter", "millimeter"]),
        (Inch, vec!["inch", "inchi", "\"", "″", "inc"]),
        (Feet, vec!["feet", "ft", "'", "′"]),
        // Liquid
        (Liter, vec!["liter", "litre", "l"]),
        (Ml, vec!["ml", "mililiter", "milliliter"]),
        (Gallon, vec!["gallon", "gal"]),
        // Electrical
        (Watt, vec!["watt", "w", "daya"]),
        (Kwh, vec!["kwh", "kilowatt hour", "kilowatt-hour"]),
        (Volt, vec!["volt", "v"]),
        (Ampere, vec!["ampere", "amp", "a"]),
        (Kva, vec!["kva", "kilovolt ampere"]),
        (Hp, vec!["hp", "horsepower", "horse power"]),
        // Quantity
        (Pcs, vec!["pcs", "pieces", "piece", "buah", "biji"]),
        (Set, vec!["set", "sets"]),
        (Pack, vec!["pack", "pak", "kemasan"]),
        (Box, vec!["box", "kotak", "dus"]),
        (Roll, vec!["roll", "gulungan", "gulung"]),
        (Sheet, vec!["sheet", "lembar", "lbr"]),
        (Papan, vec!["papan", "board", "plank"]),
        (Batang, vec!["batang", "rod", "stick"]),
        (Lembar, vec!["lembar", "lbr"]),
        (Unit, vec!["unit", "units"]),
        (Sak, vec!["sak", "karung", "zak"]),
        // Time
        (Hari, vec!["hari", "day", "days"]),
        (Minggu, vec!["minggu", "week", "weeks"]),
        (Bulan, vec!["bulan", "month", "months"]),
        (Tahun, vec!["tahun", "year", "years"]),
        (Jam, vec!["jam", "hour", "hours", "hr"]),
        (Menit, vec!["menit", "minute", "minutes", "min"]),
        (Detik, vec!["detik", "second", "seconds", "sec"]),
        // Pressure and speed
        (Psi, vec!["psi", "pound per square inch"]),
        (Bar, vec!["bar", "tekanan"]),
        (Mph, vec!["mph", "mile per hour"]),
        (Kmh, vec!["kmh", "km/h", "kilometer per hour"]),
    ]
}

/// Priority-ordered pattern table, compiled once per catalog instance.
///
/// Every fragment is wrapped in boundary anchors so short tokens cannot match
/// inside longer words: the left side must be start-of-text, whitespace, an
/// opening bracket or a digit, the right side whitespace, a closing bracket
/// or end-of-text. A fragment that fails to compile is logged and dropped
/// rather than failing catalog construction.
#[derive(Debug)]
pub struct PatternCatalog {
    entries: Vec<(UnitCode, Vec<Regex>)>,
}

impl PatternCatalog {
    pub fn new() -> Self {
        let mut entries = Vec::new();
        for (unit, fragments) in fragment_table() {
            let mut compiled = Vec::with_capacity(fragments.len());
            for fragment in fragments {
                match bounded_pattern(fragment) {
                    Ok(regex) => compiled.push(regex),
                    Err(e) => {
                        warn!(unit = %unit, fragment, "skipping unit pattern that failed to compile: {e}");
                    }
                }
            }
            entries.push((unit, compiled));
        }
        Self { entries }
    }

    /// Units with their compiled patterns, in priority order.
    pub fn entries(&self) -> &[(UnitCode, Vec<Regex>)] {
        &self.entries
    }
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn bounded_pattern(fragment: &str) -> Result<Regex, regex::Error> {
    let wrapped = format!(r"(?:^|\s|[\(\[\{{]|\d)(?:{fragment})(?:\s|[\)\]\}}]|$)");
    RegexBuilder::new(&wrapped).case_insensitive(true).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_compiles_every_fragment() {
        let catalog = PatternCatalog::new();
        for (unit, patterns) in catalog.entries() {
            assert!(!patterns.is_empty(), "no compiled patterns for {unit}");
        }
    }

    #[test]
    fn test_priority_order_starts_with_area() {
        let catalog = PatternCatalog::new();
        let first: Vec<UnitCode> = catalog.entries().iter().take(4).map(|(u, _)| *u).collect();
        assert_eq!(first, vec![UnitCode::M2, UnitCode::Cm2, UnitCode::Inch2, UnitCode::Mm2]);
    }

    #[test]
    fn test_boundary_anchor_blocks_embedded_tokens() {
        let meter = bounded_pattern("m").unwrap();
        assert!(meter.is_match("panjang 100 m"));
        assert!(meter.is_match("(100m)"));
        assert!(!meter.is_match("100 cm"));
        assert!(!meter.is_match("5ml"));
    }

    #[test]
    fn test_boundary_anchor_accepts_digit_prefix() {
        let kg = bounded_pattern("kg").unwrap();
        assert!(kg.is_match("50kg"));
        assert!(kg.is_match("berat 50 kg"));
        assert!(!kg.is_match("bungkus"));
    }
}
