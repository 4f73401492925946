//! amz-compare - Compare Amazon search prices between two regional storefronts.

use amz_compare::amazon::regions::Region;
use amz_compare::commands::{ProductCommand, SearchCommand};
use amz_compare::config::{Config, OutputFormat};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "amz-compare",
    version,
    about = "Compare Amazon search prices between two regional storefronts",
    long_about = "Crawls the same Amazon search on two storefronts page by page and lists the products sold on both with each storefront's price."
)]
struct Cli {
    /// Primary storefront (names and product details come from here)
    #[arg(short = 'a', long, global = true, env = "AMZ_REGION_A")]
    region_a: Option<Region>,

    /// Storefront to compare against
    #[arg(short = 'b', long, global = true, env = "AMZ_REGION_B")]
    region_b: Option<Region>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "AMZ_PROXY")]
    proxy: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare prices for a search keyword
    #[command(alias = "s")]
    Search {
        /// Search keyword
        keyword: String,

        /// Number of result pages to crawl on each storefront
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        pages: Option<u32>,
    },

    /// Show the detail table of a product by ASIN
    #[command(alias = "p")]
    Product {
        /// ASIN to look up
        asin: String,
    },

    /// List supported regions
    Regions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(region) = cli.region_a {
        config.region_a = region;
    }
    if let Some(region) = cli.region_b {
        config.region_b = region;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    match cli.command {
        Commands::Search { keyword, pages } => {
            if let Some(pages) = pages {
                config.max_pages = pages;
            }

            let output = SearchCommand::new(config).execute(&keyword).await?;
            println!("{}", output);
        }

        Commands::Product { asin } => {
            let output = ProductCommand::new(config).execute(&asin).await?;
            println!("{}", output);
        }

        Commands::Regions => {
            println!("Supported Amazon regions:\n");
            println!("{:<6} {:<16} {:<20} {:<10}", "Code", "Country", "Domain", "Currency");
            println!("{:-<6} {:-<16} {:-<20} {:-<10}", "", "", "", "");

            for region in Region::all() {
                println!(
                    "{:<6} {:<16} {:<20} {:<10}",
                    region.to_string(),
                    region.country(),
                    region.domain(),
                    region.currency()
                );
            }
        }
    }

    Ok(())
}
