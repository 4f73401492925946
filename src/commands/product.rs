//! Product lookup command: the detail table of one ASIN.

use crate::amazon::{HttpPageProvider, PageProvider};
use crate::compare::{Comparator, MarketPair};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::Result;
use tracing::info;

/// Executes a product detail lookup by ASIN.
pub struct ProductCommand {
    config: Config,
}

impl ProductCommand {
    /// Creates a new product command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches product details and returns formatted output.
    pub async fn execute(&self, asin: &str) -> Result<String> {
        self.execute_with_provider(HttpPageProvider::new(&self.config), asin).await
    }

    /// Fetches product details with a provided page provider (for testing).
    pub async fn execute_with_provider(
        &self,
        provider: impl PageProvider,
        asin: &str,
    ) -> Result<String> {
        let asin = normalize_asin(asin)?;
        self.config.validate()?;

        info!("Looking up product: {}", asin);

        let comparator = Comparator::new(provider, MarketPair::from_config(&self.config));
        let details = comparator.product_details(&asin).await?;

        let formatter =
            Formatter::new(self.config.format, self.config.region_a, self.config.region_b);
        Ok(formatter.format_details(&asin, &details))
    }
}

/// Trims and uppercases an ASIN, rejecting anything but 10 alphanumerics.
pub fn normalize_asin(asin: &str) -> Result<String> {
    let asin = asin.trim().to_uppercase();
    if asin.len() != 10 || !asin.chars().all(|c| c.is_ascii_alphanumeric()) {
        anyhow::bail!(
            "Invalid ASIN format: '{}'. ASIN should be 10 alphanumeric characters.",
            asin
        );
    }
    Ok(asin)
}
