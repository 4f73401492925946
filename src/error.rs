//! Error types for sessions, extraction and the comparison pipeline.

use thiserror::Error;

/// Failure raised by a single session or extractor.
#[derive(Debug, Error)]
pub enum PageError {
    /// Network error, timeout, bad status or a rejected page (CAPTCHA, error page).
    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// A section the extractor requires is absent from the page.
    #[error("Required section '{selector}' not found on page")]
    MissingSection { selector: &'static str },

    /// Extraction was attempted before any page was loaded.
    #[error("No document loaded; navigate before extracting")]
    NoDocument,

    /// Opening or closing the session failed.
    #[error("Session error: {0}")]
    Session(String),
}

impl PageError {
    /// Builds a navigation failure from any displayable cause.
    pub fn navigation(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        PageError::Navigation { url: url.into(), reason: format!("{:#}", reason) }
    }
}

/// Failure surfaced by the public comparison operations.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("Price comparison crawl failed: {0}")]
    Crawl(#[source] PageError),

    #[error("Product detail extraction failed: {0}")]
    Details(#[source] PageError),
}

impl CompareError {
    /// Returns the underlying page-level cause.
    pub fn cause(&self) -> &PageError {
        match self {
            CompareError::Crawl(cause) | CompareError::Details(cause) => cause,
        }
    }
}
