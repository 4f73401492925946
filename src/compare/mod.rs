//! Two-storefront price comparison: merging and the paginated crawl.

pub mod merge;
pub mod pipeline;

pub use merge::merge;
pub use pipeline::{crawl_page, Comparator, CrawlState, Market, MarketPair, DEFAULT_MAX_PAGES};
