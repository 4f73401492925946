//! amz-compare - Compare Amazon search prices between two regional storefronts
//!
//! Crawls the same search on two storefronts page by page, merges the
//! listings found on both by ASIN, and reads product detail tables.

pub mod amazon;
pub mod commands;
pub mod compare;
pub mod config;
pub mod error;
pub mod format;

pub use amazon::models::{DetailRecord, MergedListing, RawListing};
pub use amazon::regions::Region;
pub use compare::{Comparator, MarketPair};
pub use config::Config;
pub use error::{CompareError, PageError};
