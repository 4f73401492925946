//! Paginated two-storefront crawl: page-pair driver and orchestrator.

use crate::amazon::models::{DetailRecord, MergedListing};
use crate::amazon::regions::Region;
use crate::amazon::session::{PageProvider, Session};
use crate::compare::merge::merge;
use crate::config::Config;
use crate::error::{CompareError, PageError};
use tracing::{debug, error, info, warn};

/// Number of result pages crawled when the caller does not choose one.
pub const DEFAULT_MAX_PAGES: u32 = 20;

/// A storefront and the root URL its pages are requested from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Market {
    pub region: Region,
    pub base_url: String,
}

impl Market {
    pub fn new(region: Region) -> Self {
        Self { region, base_url: region.base_url() }
    }

    /// Uses `base_url` instead of the region's public storefront (mirrors, tests).
    pub fn with_base_url(region: Region, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { region, base_url }
    }

    /// Search results URL for `keyword` at 1-based `page`.
    pub fn listing_url(&self, keyword: &str, page: u32) -> String {
        format!("{}/s?k={}&page={}", self.base_url, urlencoding::encode(keyword), page)
    }

    /// Product page URL for an ASIN.
    pub fn detail_url(&self, id: &str) -> String {
        format!("{}/dp/{}", self.base_url, urlencoding::encode(id))
    }
}

/// The two storefronts being compared. Region A is primary: merged names
/// and product details come from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketPair {
    pub a: Market,
    pub b: Market,
}

impl MarketPair {
    pub fn new(a: Market, b: Market) -> Self {
        Self { a, b }
    }

    pub fn from_config(config: &Config) -> Self {
        let market = |region: Region, base_url: &Option<String>| match base_url {
            Some(url) => Market::with_base_url(region, url.as_str()),
            None => Market::new(region),
        };

        Self::new(
            market(config.region_a, &config.base_url_a),
            market(config.region_b, &config.base_url_b),
        )
    }
}

/// Progress of one search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    Idle,
    Paging(u32),
    Done,
    Failed,
}

impl CrawlState {
    /// Leaves `Idle`: first page, or straight to `Done` when there are no pages.
    pub fn start(self, max_pages: u32) -> Self {
        match self {
            CrawlState::Idle if max_pages == 0 => CrawlState::Done,
            CrawlState::Idle => CrawlState::Paging(1),
            other => other,
        }
    }

    /// Advances once the current page has been merged.
    pub fn page_merged(self, max_pages: u32) -> Self {
        match self {
            CrawlState::Paging(page) if page >= max_pages => CrawlState::Done,
            CrawlState::Paging(page) => CrawlState::Paging(page + 1),
            other => other,
        }
    }

    pub fn fail(self) -> Self {
        match self {
            CrawlState::Done => CrawlState::Done,
            _ => CrawlState::Failed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CrawlState::Done | CrawlState::Failed)
    }
}

/// Crawls one page index on both storefronts and merges the results.
///
/// Both navigations finish before either extraction starts. A failure on
/// either side fails the whole page.
pub async fn crawl_page(
    session_a: &mut dyn Session,
    session_b: &mut dyn Session,
    markets: &MarketPair,
    keyword: &str,
    page: u32,
) -> Result<Vec<MergedListing>, PageError> {
    let url_a = markets.a.listing_url(keyword, page);
    let url_b = markets.b.listing_url(keyword, page);

    tokio::try_join!(session_a.navigate(&url_a), session_b.navigate(&url_b))?;
    debug!("Page {} loaded on {} and {}", page, markets.a.region, markets.b.region);

    let (listings_a, listings_b) =
        tokio::try_join!(session_a.extract_listings(), session_b.extract_listings())?;
    debug!(
        "Page {}: {} listings on {}, {} on {}",
        page,
        listings_a.len(),
        markets.a.region,
        listings_b.len(),
        markets.b.region
    );

    Ok(merge(&listings_a, &listings_b))
}

/// Runs price comparisons and detail lookups against a [`PageProvider`].
pub struct Comparator<P> {
    provider: P,
    markets: MarketPair,
}

impl<P: PageProvider> Comparator<P> {
    pub fn new(provider: P, markets: MarketPair) -> Self {
        Self { provider, markets }
    }

    pub fn markets(&self) -> &MarketPair {
        &self.markets
    }

    /// Crawls pages `1..=max_pages` of `keyword` on both storefronts and
    /// returns the products listed on both, page by page.
    ///
    /// Fails on the first navigation or extraction error; no partial results
    /// are returned. Both sessions are closed whatever the outcome.
    pub async fn search(
        &self,
        keyword: &str,
        max_pages: u32,
    ) -> Result<Vec<MergedListing>, CompareError> {
        info!(
            "Comparing '{}' on {} and {} ({} pages)",
            keyword, self.markets.a.region, self.markets.b.region, max_pages
        );

        match self.run_search(keyword, max_pages).await {
            Ok(results) => {
                info!("Found {} products listed on both storefronts", results.len());
                Ok(results)
            }
            Err(cause) => {
                error!("Price comparison for '{}' failed: {}", keyword, cause);
                Err(CompareError::Crawl(cause))
            }
        }
    }

    /// Reads the detail table of a product from the primary storefront.
    pub async fn product_details(&self, id: &str) -> Result<DetailRecord, CompareError> {
        info!("Fetching details for {} from {}", id, self.markets.a.region);

        match self.run_details(id).await {
            Ok(record) => Ok(record),
            Err(cause) => {
                error!("Detail lookup for {} failed: {}", id, cause);
                Err(CompareError::Details(cause))
            }
        }
    }

    async fn run_search(
        &self,
        keyword: &str,
        max_pages: u32,
    ) -> Result<Vec<MergedListing>, PageError> {
        if max_pages == 0 {
            debug!("No pages requested");
            return Ok(Vec::new());
        }

        let (mut session_a, mut session_b) = self.open_pair().await?;

        let outcome =
            self.page_through(session_a.as_mut(), session_b.as_mut(), keyword, max_pages).await;

        close_quietly(session_a.as_mut()).await;
        close_quietly(session_b.as_mut()).await;

        outcome
    }

    async fn page_through(
        &self,
        session_a: &mut dyn Session,
        session_b: &mut dyn Session,
        keyword: &str,
        max_pages: u32,
    ) -> Result<Vec<MergedListing>, PageError> {
        let mut results = Vec::new();
        let mut state = CrawlState::Idle.start(max_pages);

        while let CrawlState::Paging(page) = state {
            match crawl_page(session_a, session_b, &self.markets, keyword, page).await {
                Ok(merged) => {
                    info!("Page {}/{}: {} matched products", page, max_pages, merged.len());
                    results.extend(merged);
                    state = state.page_merged(max_pages);
                }
                Err(e) => {
                    state = state.fail();
                    debug!("Crawl state: {:?} at page {}", state, page);
                    return Err(e);
                }
            }
        }

        debug!("Crawl state: {:?}", state);
        Ok(results)
    }

    async fn open_pair(&self) -> Result<(Box<dyn Session>, Box<dyn Session>), PageError> {
        let mut session_a = self.provider.open_session(self.markets.a.region).await?;

        match self.provider.open_session(self.markets.b.region).await {
            Ok(session_b) => Ok((session_a, session_b)),
            Err(e) => {
                close_quietly(session_a.as_mut()).await;
                Err(e)
            }
        }
    }

    async fn run_details(&self, id: &str) -> Result<DetailRecord, PageError> {
        let mut session = self.provider.open_session(self.markets.a.region).await?;
        let url = self.markets.a.detail_url(id);

        let outcome = async {
            session.navigate(&url).await?;
            session.extract_details().await
        }
        .await;

        close_quietly(session.as_mut()).await;
        outcome
    }
}

async fn close_quietly(session: &mut dyn Session) {
    if let Err(e) = session.close().await {
        warn!("Failed to close {} session: {}", session.region(), e);
    }
}
