//! Browsing sessions: the page-loading capability the comparison pipeline runs on.

use crate::amazon::models::{DetailRecord, RawListing};
use crate::amazon::parser;
use crate::amazon::regions::Region;
use crate::config::Config;
use crate::error::PageError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use wreq::Client;
use wreq_util::Emulation;

/// One navigable, content-queryable browsing context for a single storefront.
#[async_trait]
pub trait Session: Send + Sync {
    /// Storefront this session browses.
    fn region(&self) -> Region;

    /// Loads `url`, returning once its content is available.
    async fn navigate(&mut self, url: &str) -> Result<(), PageError>;

    /// Extracts search listings from the loaded page.
    async fn extract_listings(&self) -> Result<Vec<RawListing>, PageError>;

    /// Extracts the product detail table from the loaded page.
    async fn extract_details(&self) -> Result<DetailRecord, PageError>;

    /// Releases the session.
    async fn close(&mut self) -> Result<(), PageError>;
}

/// Opens sessions - enables swapping the real page loader for fixtures in tests.
#[async_trait]
pub trait PageProvider: Send + Sync {
    async fn open_session(&self, region: Region) -> Result<Box<dyn Session>, PageError>;
}

/// Opens [`HttpSession`]s configured from [`Config`].
#[derive(Debug, Clone)]
pub struct HttpPageProvider {
    proxy: Option<String>,
    timeout: Duration,
}

impl HttpPageProvider {
    pub fn new(config: &Config) -> Self {
        Self { proxy: config.proxy.clone(), timeout: Duration::from_secs(config.timeout_secs) }
    }

    fn build_client(&self) -> Result<Client> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(self.timeout)
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &self.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        builder.build().context("Failed to build HTTP client")
    }
}

#[async_trait]
impl PageProvider for HttpPageProvider {
    async fn open_session(&self, region: Region) -> Result<Box<dyn Session>, PageError> {
        let client = self.build_client().map_err(|e| PageError::Session(format!("{:#}", e)))?;
        debug!("Opened session for {}", region);
        Ok(Box::new(HttpSession::new(client, region)))
    }
}

/// Session backed by an HTTP client with browser impersonation.
///
/// Each session owns its client, so cookies never leak between storefronts.
pub struct HttpSession {
    client: Client,
    region: Region,
    document: Option<String>,
}

impl HttpSession {
    pub fn new(client: Client, region: Region) -> Self {
        Self { client, region, document: None }
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8")
            .header("Accept-Language", self.region.accept_language())
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Cache-Control", "no-cache")
            .header("Sec-Fetch-Dest", "document")
            .header("Sec-Fetch-Mode", "navigate")
            .header("Sec-Fetch-Site", "none")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status == 503 {
            anyhow::bail!("Rate limited by Amazon (503)");
        }

        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        if let Some(host) = response.uri().host() {
            if is_foreign_storefront(host, self.region) {
                warn!(
                    "Redirected to different storefront: {}. Your IP may be associated with another region.",
                    response.uri()
                );
            }
        }

        let body = response.text().await.context("Failed to read response body")?;

        if let Some(reason) = parser::rejection_reason(&body) {
            anyhow::bail!(reason);
        }

        Ok(body)
    }

    fn document(&self) -> Result<&str, PageError> {
        self.document.as_deref().ok_or(PageError::NoDocument)
    }
}

/// True when `host` is an Amazon storefront other than `region`'s own.
fn is_foreign_storefront(host: &str, region: Region) -> bool {
    let lower = host.to_ascii_lowercase();
    let host = lower.strip_prefix("www.").unwrap_or(&lower);
    host.starts_with("amazon.") && host != region.domain()
}

#[async_trait]
impl Session for HttpSession {
    fn region(&self) -> Region {
        self.region
    }

    async fn navigate(&mut self, url: &str) -> Result<(), PageError> {
        self.document = None;
        let body = self.fetch(url).await.map_err(|e| PageError::navigation(url, e))?;
        self.document = Some(body);
        Ok(())
    }

    async fn extract_listings(&self) -> Result<Vec<RawListing>, PageError> {
        Ok(parser::extract_listings(self.document()?))
    }

    async fn extract_details(&self) -> Result<DetailRecord, PageError> {
        parser::extract_details(self.document()?)
    }

    async fn close(&mut self) -> Result<(), PageError> {
        debug!("Closing session for {}", self.region);
        self.document = None;
        Ok(())
    }
}
