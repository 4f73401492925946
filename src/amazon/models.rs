//! Data models for extracted listings, merged comparisons and product details.

use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

/// One search result as it appears on a single storefront page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawListing {
    /// Product title
    pub name: String,
    /// Price exactly as displayed, currency symbol included
    pub price: String,
    /// Amazon Standard Identification Number
    pub id: String,
}

impl RawListing {
    pub fn new(name: impl Into<String>, price: impl Into<String>, id: impl Into<String>) -> Self {
        Self { name: name.into(), price: price.into(), id: id.into() }
    }
}

/// A product found on both storefronts, with each region's price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedListing {
    /// Title as shown on region A
    pub name: String,
    /// Shared ASIN
    pub id: String,
    /// Price text from region A
    pub price_region_a: String,
    /// Price text from region B
    pub price_region_b: String,
}

impl MergedListing {
    /// Combines a region A listing with its region B counterpart.
    pub fn from_pair(a: &RawListing, b: &RawListing) -> Self {
        Self {
            name: a.name.clone(),
            id: a.id.clone(),
            price_region_a: a.price.clone(),
            price_region_b: b.price.clone(),
        }
    }
}

/// Attribute label to value, in the order the rows appear on the page.
///
/// A repeated label keeps its first position and takes the later value.
pub type DetailRecord = IndexMap<String, String>;
