//! Output formatting for comparisons and product details (table, JSON, markdown, CSV).

use crate::amazon::models::{DetailRecord, MergedListing};
use crate::amazon::regions::Region;
use crate::config::OutputFormat;

const TITLE_WIDTH: usize = 50;

/// Formats comparison results for output.
pub struct Formatter {
    format: OutputFormat,
    region_a: Region,
    region_b: Region,
    link_base: String,
}

impl Formatter {
    /// Creates a formatter labelling prices with the two compared regions.
    pub fn new(format: OutputFormat, region_a: Region, region_b: Region) -> Self {
        Self { format, region_a, region_b, link_base: region_a.base_url() }
    }

    /// Points product links at `base_url` instead of the primary region's public storefront.
    pub fn with_link_base(mut self, base_url: impl Into<String>) -> Self {
        self.link_base = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Formats merged listings.
    pub fn format_listings(&self, listings: &[MergedListing]) -> String {
        if listings.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No matching products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(listings).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Table => self.table_listings(listings),
            OutputFormat::Markdown => self.markdown_listings(listings),
            OutputFormat::Csv => self.csv_listings(listings),
        }
    }

    /// Formats a product detail record.
    pub fn format_details(&self, id: &str, details: &DetailRecord) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(details).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Table => self.table_details(id, details),
            OutputFormat::Markdown => self.markdown_details(id, details),
            OutputFormat::Csv => self.csv_details(details),
        }
    }

    fn price_header(region: Region) -> String {
        format!("Price ({})", region.to_string().to_uppercase())
    }

    // Table formatting

    fn table_listings(&self, listings: &[MergedListing]) -> String {
        let id_width = 10;
        let price_width = 12;
        let title_width = TITLE_WIDTH;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<id_width$}  {:>price_width$}  {:>price_width$}  {}",
            "ASIN",
            Self::price_header(self.region_a),
            Self::price_header(self.region_b),
            "Title"
        ));
        lines.push(format!(
            "{:-<id_width$}  {:-<price_width$}  {:-<price_width$}  {:-<title_width$}",
            "", "", "", ""
        ));

        for listing in listings {
            lines.push(format!(
                "{:<id_width$}  {:>price_width$}  {:>price_width$}  {}",
                listing.id,
                listing.price_region_a,
                listing.price_region_b,
                truncate(&listing.name, title_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "Total: {} products listed on both {} and {}",
            listings.len(),
            self.region_a.domain(),
            self.region_b.domain()
        ));

        lines.join("\n")
    }

    fn table_details(&self, id: &str, details: &DetailRecord) -> String {
        if details.is_empty() {
            return format!("No details found for {}.", id);
        }

        let label_width = details.keys().map(|k| k.chars().count()).max().unwrap_or(0);

        let mut lines = vec![format!("Product details for {}", id), String::new()];
        for (label, value) in details {
            lines.push(format!("{:<label_width$}  {}", label, value));
        }

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_listings(&self, listings: &[MergedListing]) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "| ASIN | {} | {} | Title |",
            Self::price_header(self.region_a),
            Self::price_header(self.region_b)
        ));
        lines.push("|------|------|------|-------|".to_string());

        for listing in listings {
            lines.push(format!(
                "| {} | {} | {} | [{}]({}/dp/{}) |",
                listing.id,
                listing.price_region_a,
                listing.price_region_b,
                truncate(&listing.name, 40).replace('|', "\\|"),
                self.link_base,
                listing.id
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} products found*", listings.len()));

        lines.join("\n")
    }

    fn markdown_details(&self, id: &str, details: &DetailRecord) -> String {
        let mut lines = vec![format!("## {}", id), String::new()];

        for (label, value) in details {
            lines.push(format!("- **{}:** {}", label, value));
        }

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        format!("asin,title,price_{},price_{}", self.region_a, self.region_b)
    }

    fn csv_listings(&self, listings: &[MergedListing]) -> String {
        let mut lines = vec![self.csv_header()];

        for listing in listings {
            lines.push(format!(
                "{},{},{},{}",
                listing.id,
                csv_escape(&listing.name),
                csv_escape(&listing.price_region_a),
                csv_escape(&listing.price_region_b)
            ));
        }

        lines.join("\n")
    }

    fn csv_details(&self, details: &DetailRecord) -> String {
        let mut lines = vec!["label,value".to_string()];

        for (label, value) in details {
            lines.push(format!("{},{}", csv_escape(label), csv_escape(value)));
        }

        lines.join("\n")
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
