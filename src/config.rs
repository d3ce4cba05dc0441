// src/config.rs
// =============================================================================
// Crawler settings.
//
// All knobs live in one struct with sensible defaults. The CLI overrides
// the ones the user passes; everything else keeps its default.
// =============================================================================

use std::time::Duration;

/// Page budget used when the caller doesn't ask for one
pub const DEFAULT_MAX_PAGES: usize = 8;
/// Hard bounds on the per-target page budget
pub const MIN_MAX_PAGES: usize = 1;
pub const MAX_MAX_PAGES: usize = 25;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Identifying user agent sent with every request
    pub user_agent: String,
    /// Per-request timeout; a timeout is recorded like any network failure
    pub request_timeout: Duration,
    /// Redirects followed before giving up on a page
    pub max_redirects: usize,
    /// How many target sites may be crawled at the same time (1 = one after another)
    pub target_concurrency: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            user_agent: format!(
                "contact-scout/{} (+contact affordance crawler)",
                env!("CARGO_PKG_VERSION")
            ),
            request_timeout: Duration::from_secs(10),
            max_redirects: 10,
            target_concurrency: 1,
        }
    }
}

impl CrawlConfig {
    // Applies the default and the [1, 25] bounds to a requested page budget
    pub fn clamp_max_pages(requested: Option<usize>) -> usize {
        requested
            .unwrap_or(DEFAULT_MAX_PAGES)
            .clamp(MIN_MAX_PAGES, MAX_MAX_PAGES)
    }
}
