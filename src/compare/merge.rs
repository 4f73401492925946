//! Joining two storefronts' listings on ASIN.

use crate::amazon::models::{MergedListing, RawListing};
use std::collections::HashMap;

/// Joins region A listings with region B listings on `id`.
///
/// Output follows region A order. Each region A listing pairs with the first
/// region B listing sharing its id; listings without a partner are dropped.
pub fn merge(region_a: &[RawListing], region_b: &[RawListing]) -> Vec<MergedListing> {
    let mut first_in_b: HashMap<&str, &RawListing> = HashMap::with_capacity(region_b.len());
    for listing in region_b {
        first_in_b.entry(listing.id.as_str()).or_insert(listing);
    }

    region_a
        .iter()
        .filter_map(|a| first_in_b.get(a.id.as_str()).map(|b| MergedListing::from_pair(a, b)))
        .collect()
}
