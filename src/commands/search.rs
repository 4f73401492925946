//! Search command: compare a keyword's prices across two storefronts.

use crate::amazon::{HttpPageProvider, PageProvider};
use crate::compare::{Comparator, MarketPair};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::Result;
use tracing::info;

/// Executes a two-storefront price comparison.
pub struct SearchCommand {
    config: Config,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the comparison and returns formatted output.
    pub async fn execute(&self, keyword: &str) -> Result<String> {
        self.execute_with_provider(HttpPageProvider::new(&self.config), keyword).await
    }

    /// Executes the comparison with a provided page provider (for testing).
    pub async fn execute_with_provider(
        &self,
        provider: impl PageProvider,
        keyword: &str,
    ) -> Result<String> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            anyhow::bail!("Search keyword must not be empty");
        }

        self.config.validate()?;

        let comparator = Comparator::new(provider, MarketPair::from_config(&self.config));
        let listings = comparator.search(keyword, self.config.max_pages).await?;

        info!("{} products found on both storefronts", listings.len());

        let formatter =
            Formatter::new(self.config.format, self.config.region_a, self.config.region_b)
                .with_link_base(comparator.markets().a.base_url.as_str());
        Ok(formatter.format_listings(&listings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amazon::{DetailRecord, RawListing, Region, Session};
    use crate::config::OutputFormat;
    use crate::error::PageError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Serves fixed listings per storefront, the same on every page.
    struct StaticSession {
        region: Region,
        listings: Vec<RawListing>,
        fail: bool,
    }

    #[async_trait]
    impl Session for StaticSession {
        fn region(&self) -> Region {
            self.region
        }

        async fn navigate(&mut self, url: &str) -> Result<(), PageError> {
            if self.fail {
                return Err(PageError::navigation(url, "Simulated network error"));
            }
            Ok(())
        }

        async fn extract_listings(&self) -> Result<Vec<RawListing>, PageError> {
            Ok(self.listings.clone())
        }

        async fn extract_details(&self) -> Result<DetailRecord, PageError> {
            Ok(DetailRecord::new())
        }

        async fn close(&mut self) -> Result<(), PageError> {
            Ok(())
        }
    }

    struct StaticProvider {
        listings: HashMap<Region, Vec<RawListing>>,
        fail: bool,
    }

    impl StaticProvider {
        fn new(us: &[(&str, &str)], ca: &[(&str, &str)]) -> Self {
            let to_listings = |items: &[(&str, &str)]| {
                items
                    .iter()
                    .map(|(id, price)| RawListing::new(format!("Product {}", id), *price, *id))
                    .collect::<Vec<_>>()
            };

            let mut listings = HashMap::new();
            listings.insert(Region::Us, to_listings(us));
            listings.insert(Region::Ca, to_listings(ca));
            Self { listings, fail: false }
        }

        fn failing() -> Self {
            Self { listings: HashMap::new(), fail: true }
        }
    }

    #[async_trait]
    impl PageProvider for StaticProvider {
        async fn open_session(&self, region: Region) -> Result<Box<dyn Session>, PageError> {
            Ok(Box::new(StaticSession {
                region,
                listings: self.listings.get(&region).cloned().unwrap_or_default(),
                fail: self.fail,
            }))
        }
    }

    fn make_test_config() -> Config {
        Config { max_pages: 1, ..Config::default() }
    }

    #[tokio::test]
    async fn test_search_command_basic() {
        let provider = StaticProvider::new(
            &[("B000000001", "$10.00"), ("B000000002", "$20.00")],
            &[("B000000002", "$26.00"), ("B000000009", "$1.00")],
        );
        let cmd = SearchCommand::new(make_test_config());

        let output = cmd.execute_with_provider(provider, "widget").await.unwrap();
        assert!(output.contains("B000000002"));
        assert!(output.contains("$26.00"));
        assert!(!output.contains("B000000001"));
        assert!(!output.contains("B000000009"));
    }

    #[tokio::test]
    async fn test_search_command_repeats_per_page() {
        let provider = StaticProvider::new(&[("B000000001", "$1")], &[("B000000001", "$2")]);
        let mut config = make_test_config();
        config.max_pages = 3;
        config.format = OutputFormat::Json;

        let output = SearchCommand::new(config).execute_with_provider(provider, "widget").await;
        let parsed: Vec<crate::amazon::MergedListing> =
            serde_json::from_str(&output.unwrap()).unwrap();
        assert_eq!(parsed.len(), 3);
    }

    #[tokio::test]
    async fn test_search_command_markdown_links_use_base_url_override() {
        let provider = StaticProvider::new(&[("B000000001", "$1")], &[("B000000001", "$2")]);
        let config = Config {
            base_url_a: Some("http://localhost:8080/".to_string()),
            format: OutputFormat::Markdown,
            ..make_test_config()
        };

        let output = SearchCommand::new(config).execute_with_provider(provider, "widget").await;
        let output = output.unwrap();
        assert!(output.contains("(http://localhost:8080/dp/B000000001)"));
        assert!(!output.contains("www.amazon.com"));
    }

    #[tokio::test]
    async fn test_search_command_no_overlap() {
        let provider = StaticProvider::new(&[("B000000001", "$1")], &[("B000000002", "$2")]);
        let cmd = SearchCommand::new(make_test_config());

        let output = cmd.execute_with_provider(provider, "widget").await.unwrap();
        assert_eq!(output, "No matching products found.");
    }

    #[tokio::test]
    async fn test_search_command_empty_keyword() {
        let provider = StaticProvider::new(&[], &[]);
        let cmd = SearchCommand::new(make_test_config());

        let err = cmd.execute_with_provider(provider, "   ").await.unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[tokio::test]
    async fn test_search_command_same_region_rejected() {
        let provider = StaticProvider::new(&[], &[]);
        let config = Config { region_b: Region::Us, ..make_test_config() };

        let err = SearchCommand::new(config).execute_with_provider(provider, "x").await;
        assert!(err.unwrap_err().to_string().contains("Both storefronts"));
    }

    #[tokio::test]
    async fn test_search_command_network_error() {
        let cmd = SearchCommand::new(make_test_config());

        let err = cmd.execute_with_provider(StaticProvider::failing(), "widget").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Price comparison crawl failed"));
        assert!(msg.contains("Simulated network error"));
    }
}
