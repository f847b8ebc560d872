//! Sitelens: a sitemap-driven SEO page auditor
//!
//! This crate discovers a website's sitemap(s), extracts page URLs, fetches
//! each page through a rate-limited proxy, and scores each page on basic SEO
//! signals (title, meta description, load time, image alt text).

pub mod analyzer;
pub mod config;
pub mod fetch;
pub mod history;
pub mod pipeline;
pub mod report;
pub mod sitemap;
pub mod url;

use thiserror::Error;

/// Main error type for Sitelens operations
#[derive(Debug, Error)]
pub enum SiteLensError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("History error: {0}")]
    History(#[from] history::HistoryError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Transport or HTTP failure after the retry budget is exhausted
///
/// Carries the target URL (not the proxy URL), the HTTP status forwarded by
/// the proxy when one was received, and a human-readable message.
#[derive(Debug, Clone, Error)]
#[error("failed to fetch {url}: {message}")]
pub struct FetchError {
    /// The target URL that could not be fetched
    pub url: String,

    /// HTTP status code, if the failure came from an HTTP response
    pub status_code: Option<u16>,

    /// Description of the failure
    pub message: String,
}

impl FetchError {
    /// Creates a FetchError for a non-HTTP failure (transport, channel)
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status_code: None,
            message: message.into(),
        }
    }
}

/// Sitemap discovery errors
///
/// Robots.txt and common-path misses are not errors (discovery treats them as
/// "nothing found here"); only an unusable input or a completely empty
/// discovery run is fatal.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Invalid input URL '{input}': {reason}")]
    InvalidInput { input: String, reason: String },

    #[error("No sitemaps found for {input}")]
    NoSitemaps { input: String },

    #[error("No page URLs found in sitemaps for {input}")]
    NoUrls { input: String },
}

/// Result type alias for Sitelens operations
pub type Result<T> = std::result::Result<T, SiteLensError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use fetch::FetchGateway;
pub use report::{AnalysisResult, AnalysisSummary, PageAnalysis, SeoIssue, Severity};
pub use sitemap::{SitemapDiscoverer, SitemapKind, SitemapLocation, SitemapSource};
