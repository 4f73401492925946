//! Extraction of listings and product details from Amazon HTML.

use crate::amazon::models::{DetailRecord, RawListing};
use crate::amazon::selectors::{detail, errors, listing};
use crate::error::PageError;
use regex_lite::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;
use tracing::{debug, trace};

/// Detail label whose value embeds inline script and style noise.
pub const FEEDBACK_LABEL: &str = "Customer Reviews";

static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Extracts every complete listing from a search results page, in document order.
///
/// Elements missing a title, a price or a non-empty ASIN are skipped.
pub fn extract_listings(html: &str) -> Vec<RawListing> {
    let document = Html::parse_document(html);

    let listings: Vec<RawListing> =
        document.select(&listing::RESULT).filter_map(listing_from_element).collect();

    debug!("Extracted {} listings", listings.len());
    listings
}

fn listing_from_element(element: ElementRef) -> Option<RawListing> {
    let id = match element.value().attr(listing::ID_ATTR) {
        Some(id) if !id.is_empty() => id,
        _ => {
            trace!("Skipping result element without ASIN");
            return None;
        }
    };

    let Some(title) = element.select(&listing::TITLE).next() else {
        trace!("Skipping {}: no title", id);
        return None;
    };

    let Some(price) = element.select(&listing::PRICE).next() else {
        trace!("Skipping {}: no price", id);
        return None;
    };

    Some(RawListing::new(text_of(title).trim(), text_of(price).trim(), id))
}

/// Extracts the label/value table from a product page.
///
/// Fails with [`PageError::MissingSection`] when the detail table is absent;
/// rows without both a label and a value cell are skipped.
pub fn extract_details(html: &str) -> Result<DetailRecord, PageError> {
    let document = Html::parse_document(html);

    let container = document
        .select(&detail::CONTAINER)
        .next()
        .ok_or(PageError::MissingSection { selector: detail::CONTAINER_CSS })?;

    let mut record = DetailRecord::new();
    for row in container.select(&detail::ROW) {
        let (Some(label), Some(value)) =
            (row.select(&detail::LABEL).next(), row.select(&detail::VALUE).next())
        else {
            trace!("Skipping detail row without label/value pair");
            continue;
        };

        let label = text_of(label).trim().to_string();
        let raw = text_of(value);
        let value =
            if label == FEEDBACK_LABEL { normalize_feedback(&raw) } else { raw.trim().to_string() };

        record.insert(label, value);
    }

    debug!("Extracted {} detail fields", record.len());
    Ok(record)
}

/// Removes `/* ... */` blocks and collapses whitespace runs to single spaces.
pub fn normalize_feedback(value: &str) -> String {
    let stripped = BLOCK_COMMENT.replace_all(value, "");
    WHITESPACE_RUN.replace_all(&stripped, " ").trim().to_string()
}

/// Returns why a page is a rejection (CAPTCHA or error page) rather than content.
pub fn rejection_reason(html: &str) -> Option<&'static str> {
    let document = Html::parse_document(html);

    if document.select(&errors::CAPTCHA).next().is_some() {
        return Some("CAPTCHA detected. Amazon is blocking requests; try a proxy or wait before retrying.");
    }

    if document.select(&errors::DOG_PAGE).next().is_some() {
        return Some("Amazon error page detected (503). The service may be temporarily unavailable.");
    }

    None
}

fn text_of(element: ElementRef) -> String {
    element.text().collect()
}
