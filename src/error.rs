// src/error.rs
// =============================================================================
// Request-level errors.
//
// Only these abort a crawl request. Problems with individual pages (timeouts,
// 404s, PDFs) are NOT errors at this level: they are recorded as PageRecords
// so a partial crawl still returns useful output (see crawl/fetch.rs).
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from #[error(...)]
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// A requested target is not an absolute http(s) URL
    #[error("Invalid URL '{0}': expected an absolute http(s) URL")]
    InvalidUrl(String),

    /// Every requested target was blank or a duplicate
    #[error("No valid target URLs to crawl")]
    NoValidTargets,

    /// The shared HTTP client could not be created
    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
