use serde::{Deserialize, Serialize};

use crate::units::UnitCode;

/// One normalized scraped listing entry. Construction fixes the fields;
/// enrichment builds a new value instead of mutating in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub name: String,
    pub price: u64,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<UnitCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Product {
    pub fn new(name: impl Into<String>, price: u64, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            url: url.into(),
            unit: None,
            location: None,
        }
    }

    pub fn with_unit(mut self, unit: UnitCode) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Outcome envelope of one scrape call. Failed results never carry
/// products and always carry a message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapingResult {
    pub products: Vec<Product>,
    pub success: bool,
    pub error_message: Option<String>,
    pub url: Option<String>,
}

impl ScrapingResult {
    pub fn success(products: Vec<Product>, url: impl Into<String>) -> Self {
        Self {
            products,
            success: true,
            error_message: None,
            url: Some(url.into()),
        }
    }

    pub fn failure(message: impl Into<String>, url: Option<String>) -> Self {
        Self {
            products: Vec::new(),
            success: false,
            error_message: Some(message.into()),
            url,
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
