use std::ops::RangeInclusive;

/// Collapses a price string to the digits it contains.
///
/// Deliberately locale-naive: `.` and `,` are decoration, never decimal or
/// thousands separators, so "Rp 62.500" becomes 62500 and "1,234.567"
/// becomes 1234567. Listings mix both conventions freely and the digit
/// concatenation is the behavior downstream consumers depend on.
#[derive(Debug)]
pub struct PriceCleaner {
    valid_range: Option<RangeInclusive<u64>>,
}

impl PriceCleaner {
    pub fn new() -> Self {
        Self { valid_range: None }
    }

    /// Vendor variant: prices are only valid inside a plausible range.
    pub fn with_range(min: u64, max: u64) -> Self {
        Self {
            valid_range: Some(min..=max),
        }
    }

    /// Returns 0 for empty input or text without any digit.
    pub fn clean_price(&self, text: &str) -> u64 {
        let mut price: u64 = 0;
        for c in text.chars() {
            if let Some(digit) = digit_value(c) {
                price = price.saturating_mul(10).saturating_add(digit);
            }
        }
        price
    }

    pub fn is_valid_price(&self, price: u64) -> bool {
        match &self.valid_range {
            Some(range) => range.contains(&price),
            None => price > 0,
        }
    }
}

impl Default for PriceCleaner {
    fn default() -> Self {
        Self::new()
    }
}

// ASCII digits plus the full-width forms some listings use.
fn digit_value(c: char) -> Option<u64> {
    if let Some(digit) = c.to_digit(10) {
        return Some(u64::from(digit));
    }
    let code_point = c as u32;
    if (0xFF10..=0xFF19).contains(&code_point) {
        return Some(u64::from(code_point - 0xFF10));
    }
    None
}
