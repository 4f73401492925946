//! Amazon storefronts that can take part in a comparison.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A regional Amazon storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Us,
    Ca,
    Mx,
    Uk,
    De,
    Fr,
    Es,
    It,
    Nl,
    Se,
    Pl,
    Jp,
    Au,
    In,
    Br,
}

/// Static facts about a storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionInfo {
    /// Short code used on the command line and in config files
    pub code: &'static str,
    /// Country name
    pub country: &'static str,
    /// Storefront domain
    pub domain: &'static str,
    /// ISO currency code the storefront prices in
    pub currency: &'static str,
    /// Accept-Language header sent to the storefront
    pub accept_language: &'static str,
    /// Alternative spellings accepted by the parser
    aliases: &'static [&'static str],
}

const US: RegionInfo = RegionInfo {
    code: "us",
    country: "United States",
    domain: "amazon.com",
    currency: "USD",
    accept_language: "en-US,en;q=0.9",
    aliases: &["usa", "united states"],
};
const CA: RegionInfo = RegionInfo {
    code: "ca",
    country: "Canada",
    domain: "amazon.ca",
    currency: "CAD",
    accept_language: "en-CA,en;q=0.9,fr-CA;q=0.8",
    aliases: &["canada"],
};
const MX: RegionInfo = RegionInfo {
    code: "mx",
    country: "Mexico",
    domain: "amazon.com.mx",
    currency: "MXN",
    accept_language: "es-MX,es;q=0.9,en;q=0.8",
    aliases: &["mexico"],
};
const UK: RegionInfo = RegionInfo {
    code: "uk",
    country: "United Kingdom",
    domain: "amazon.co.uk",
    currency: "GBP",
    accept_language: "en-GB,en;q=0.9",
    aliases: &["gb", "united kingdom"],
};
const DE: RegionInfo = RegionInfo {
    code: "de",
    country: "Germany",
    domain: "amazon.de",
    currency: "EUR",
    accept_language: "de-DE,de;q=0.9,en;q=0.8",
    aliases: &["germany"],
};
const FR: RegionInfo = RegionInfo {
    code: "fr",
    country: "France",
    domain: "amazon.fr",
    currency: "EUR",
    accept_language: "fr-FR,fr;q=0.9,en;q=0.8",
    aliases: &["france"],
};
const ES: RegionInfo = RegionInfo {
    code: "es",
    country: "Spain",
    domain: "amazon.es",
    currency: "EUR",
    accept_language: "es-ES,es;q=0.9,en;q=0.8",
    aliases: &["spain"],
};
const IT: RegionInfo = RegionInfo {
    code: "it",
    country: "Italy",
    domain: "amazon.it",
    currency: "EUR",
    accept_language: "it-IT,it;q=0.9,en;q=0.8",
    aliases: &["italy"],
};
const NL: RegionInfo = RegionInfo {
    code: "nl",
    country: "Netherlands",
    domain: "amazon.nl",
    currency: "EUR",
    accept_language: "nl-NL,nl;q=0.9,en;q=0.8",
    aliases: &["netherlands"],
};
const SE: RegionInfo = RegionInfo {
    code: "se",
    country: "Sweden",
    domain: "amazon.se",
    currency: "SEK",
    accept_language: "sv-SE,sv;q=0.9,en;q=0.8",
    aliases: &["sweden"],
};
const PL: RegionInfo = RegionInfo {
    code: "pl",
    country: "Poland",
    domain: "amazon.pl",
    currency: "PLN",
    accept_language: "pl-PL,pl;q=0.9,en;q=0.8",
    aliases: &["poland"],
};
const JP: RegionInfo = RegionInfo {
    code: "jp",
    country: "Japan",
    domain: "amazon.co.jp",
    currency: "JPY",
    accept_language: "ja-JP,ja;q=0.9,en;q=0.8",
    aliases: &["japan"],
};
const AU: RegionInfo = RegionInfo {
    code: "au",
    country: "Australia",
    domain: "amazon.com.au",
    currency: "AUD",
    accept_language: "en-AU,en;q=0.9",
    aliases: &["australia"],
};
const IN: RegionInfo = RegionInfo {
    code: "in",
    country: "India",
    domain: "amazon.in",
    currency: "INR",
    accept_language: "en-IN,en;q=0.9,hi;q=0.8",
    aliases: &["india"],
};
const BR: RegionInfo = RegionInfo {
    code: "br",
    country: "Brazil",
    domain: "amazon.com.br",
    currency: "BRL",
    accept_language: "pt-BR,pt;q=0.9,en;q=0.8",
    aliases: &["brazil"],
};

impl Region {
    /// Returns the static facts for this storefront.
    pub fn info(&self) -> &'static RegionInfo {
        match self {
            Region::Us => &US,
            Region::Ca => &CA,
            Region::Mx => &MX,
            Region::Uk => &UK,
            Region::De => &DE,
            Region::Fr => &FR,
            Region::Es => &ES,
            Region::It => &IT,
            Region::Nl => &NL,
            Region::Se => &SE,
            Region::Pl => &PL,
            Region::Jp => &JP,
            Region::Au => &AU,
            Region::In => &IN,
            Region::Br => &BR,
        }
    }

    pub fn domain(&self) -> &'static str {
        self.info().domain
    }

    pub fn currency(&self) -> &'static str {
        self.info().currency
    }

    pub fn country(&self) -> &'static str {
        self.info().country
    }

    pub fn accept_language(&self) -> &'static str {
        self.info().accept_language
    }

    /// Returns the storefront root, e.g. `https://www.amazon.ca`.
    pub fn base_url(&self) -> String {
        format!("https://www.{}", self.domain())
    }

    /// Returns all supported regions.
    pub fn all() -> &'static [Region] {
        &[
            Region::Us,
            Region::Ca,
            Region::Mx,
            Region::Uk,
            Region::De,
            Region::Fr,
            Region::Es,
            Region::It,
            Region::Nl,
            Region::Se,
            Region::Pl,
            Region::Jp,
            Region::Au,
            Region::In,
            Region::Br,
        ]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().code)
    }
}

impl FromStr for Region {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Region::all()
            .iter()
            .copied()
            .find(|r| {
                let info = r.info();
                info.code == wanted || info.aliases.contains(&wanted.as_str())
            })
            .ok_or_else(|| RegionParseError(s.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct RegionParseError(String);

impl fmt::Display for RegionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<&str> = Region::all().iter().map(|r| r.info().code).collect();
        write!(f, "Unknown region '{}'. Valid regions: {}", self.0, codes.join(", "))
    }
}

impl std::error::Error for RegionParseError {}
