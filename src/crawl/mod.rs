// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling from a start URL, bounded by a page budget
// - Same-origin restriction (never leaves the start host)
// - Contact-looking links are crawled first
// - URL canonicalization so each page is fetched at most once
//
// Submodules:
// - canonical: URL -> stable dedup key
// - fetch: HTTP fetching and per-page failure classification
// - queue: two-tier crawl queue with queued/visited sets
// - job: the crawl loop itself
// =============================================================================

mod canonical;
mod fetch;
mod job;
mod queue;

// Re-export what the rest of the application uses
pub use canonical::canonicalize;
pub use job::Crawler;
