//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::amazon::regions::Region;
use crate::compare::DEFAULT_MAX_PAGES;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Primary storefront; merged names and product details come from here
    #[serde(default)]
    pub region_a: Region,

    /// Storefront compared against the primary one
    #[serde(default = "default_region_b")]
    pub region_b: Region,

    /// Overrides the primary storefront root URL
    #[serde(default)]
    pub base_url_a: Option<String>,

    /// Overrides the secondary storefront root URL
    #[serde(default)]
    pub base_url_b: Option<String>,

    /// Number of result pages crawled per search
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_region_b() -> Region {
    Region::Ca
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region_a: Region::Us,
            region_b: default_region_b(),
            base_url_a: None,
            base_url_b: None,
            max_pages: default_max_pages(),
            proxy: None,
            timeout_secs: default_timeout_secs(),
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("amz-compare").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides. Unparseable values are ignored.
    pub fn with_env(mut self) -> Self {
        if let Some(region) = env_parsed("AMZ_REGION_A") {
            self.region_a = region;
        }

        if let Some(region) = env_parsed("AMZ_REGION_B") {
            self.region_b = region;
        }

        if let Ok(proxy) = std::env::var("AMZ_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Some(pages) = env_parsed("AMZ_MAX_PAGES") {
            self.max_pages = pages;
        }

        if let Some(timeout) = env_parsed("AMZ_TIMEOUT") {
            self.timeout_secs = timeout;
        }

        self
    }

    /// Rejects settings that cannot produce a meaningful comparison.
    pub fn validate(&self) -> Result<()> {
        if self.region_a == self.region_b && self.base_url_a == self.base_url_b {
            anyhow::bail!(
                "Both storefronts are '{}'. Choose two different regions to compare.",
                self.region_a
            );
        }

        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be at least 1");
        }

        Ok(())
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    let value = std::env::var(key).ok()?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            debug!("Ignoring invalid {}={}", key, value);
            None
        }
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.region_a, Region::Us);
        assert_eq!(config.region_b, Region::Ca);
        assert_eq!(config.max_pages, 20);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.format, OutputFormat::Table);
        assert!(config.proxy.is_none());
        assert!(config.base_url_a.is_none());
        assert!(config.base_url_b.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);

        let err = "invalid".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("Unknown format"));
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            region_a = "uk"
            region_b = "de"
            max_pages = 5
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.region_a, Region::Uk);
        assert_eq!(config.region_b, Region::De);
        assert_eq!(config.max_pages, 5);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_config_from_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.region_a, Region::Us);
        assert_eq!(config.region_b, Region::Ca);
        assert_eq!(config.max_pages, 20);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            region_b = "mx"
            base_url_a = "http://localhost:8080"
            proxy = "socks5://localhost:1080"
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.region_b, Region::Mx);
        assert_eq!(config.base_url_a.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.proxy.as_deref(), Some("socks5://localhost:1080"));
    }

    #[test]
    fn test_config_from_file_not_found() {
        let err = Config::from_file("/nonexistent/path/config.toml").unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let err = Config::from_file(file.path()).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "max_pages = 3").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.max_pages, 3);
    }

    #[test]
    fn test_config_with_env() {
        let keys = ["AMZ_REGION_A", "AMZ_REGION_B", "AMZ_MAX_PAGES", "AMZ_TIMEOUT"];
        let saved: Vec<Option<String>> = keys.iter().map(|k| std::env::var(k).ok()).collect();

        std::env::set_var("AMZ_REGION_A", "uk");
        std::env::set_var("AMZ_REGION_B", "germany");
        std::env::set_var("AMZ_MAX_PAGES", "not_a_number");
        std::env::set_var("AMZ_TIMEOUT", "45");

        let config = Config::new().with_env();
        assert_eq!(config.region_a, Region::Uk);
        assert_eq!(config.region_b, Region::De);
        assert_eq!(config.max_pages, 20);
        assert_eq!(config.timeout_secs, 45);

        for (key, value) in keys.iter().zip(saved) {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }

    #[test]
    fn test_validate_rejects_same_storefront() {
        let config = Config { region_b: Region::Us, ..Config::default() };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("Both storefronts are 'us'"));

        // Same region behind different roots is allowed.
        let config = Config {
            region_b: Region::Us,
            base_url_b: Some("http://mirror.local".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config { timeout_secs: 0, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            region_a: Region::Uk,
            region_b: Region::Fr,
            base_url_a: None,
            base_url_b: Some("http://localhost:9000".to_string()),
            max_pages: 7,
            proxy: Some("socks5://localhost:1080".to_string()),
            timeout_secs: 12,
            format: OutputFormat::Csv,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.region_a, config.region_a);
        assert_eq!(parsed.region_b, config.region_b);
        assert_eq!(parsed.base_url_b, config.base_url_b);
        assert_eq!(parsed.max_pages, config.max_pages);
        assert_eq!(parsed.timeout_secs, config.timeout_secs);
        assert_eq!(parsed.format, config.format);
    }
}
