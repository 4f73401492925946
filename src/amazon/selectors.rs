//! CSS selectors for Amazon HTML extraction.
//!
//! Listing and detail extraction depend on a stable page structure.
//! When a storefront changes its markup, update the selectors here and
//! add a fixture under `tests/fixtures/`.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for search result pages.
pub mod listing {
    use super::*;

    /// Any listing-shaped element on a result page.
    pub static RESULT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".s-result-item").unwrap());

    /// Attribute carrying the marketplace identifier (ASIN).
    pub static ID_ATTR: &str = "data-asin";

    /// Product title heading.
    pub static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2").unwrap());

    /// Screen-reader price text, e.g. `$29.99`.
    pub static PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".a-offscreen").unwrap());
}

/// Selectors for the product detail table.
pub mod detail {
    use super::*;

    /// Raw selector text of the required container, reported when it is missing.
    pub const CONTAINER_CSS: &str = "#productDetails_detailBullets_sections1";

    /// Detail table holding the label/value rows.
    pub static CONTAINER: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(CONTAINER_CSS).unwrap());

    /// One label/value row.
    pub static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());

    /// Row label cell.
    pub static LABEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").unwrap());

    /// Row value cell.
    pub static VALUE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
}

/// Selectors for pages that reject the request instead of serving content.
pub mod errors {
    use super::*;

    /// CAPTCHA challenge form and its input field.
    pub static CAPTCHA: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "form[action*='validateCaptcha'], \
             input#captchacharacters",
        )
        .unwrap()
    });

    /// Dog page (Amazon's error page), recognized by its 503 home link and error banner.
    /// Image alt text is never used: product titles routinely mention dogs.
    pub static DOG_PAGE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "a[href*='cs_503_link'], \
             img[src*='/error/500_503']",
        )
        .unwrap()
    });
}
