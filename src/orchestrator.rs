// src/orchestrator.rs
// =============================================================================
// This module runs a whole crawl request: one crawl job per target site,
// then merges the results into a single report.
//
// Steps:
// 1. Validate every requested URL (absolute http/https, or the request fails)
// 2. Canonicalize and dedup the targets, keeping first-occurrence order
// 3. Run one crawl job per target (one after another by default)
// 4. Merge pages and matches across jobs, first occurrence wins
//
// Running jobs concurrently is opt-in (CrawlConfig::target_concurrency).
// We use an ORDERED buffered stream, so results still arrive in target
// order and the merged report is identical to a sequential run.
//
// Rust concepts:
// - futures::stream: buffered() runs N futures at once but yields in order
// - try_collect(): stops at the first Err and returns it
// =============================================================================

use std::collections::HashSet;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::info;
use url::Url;

use crate::config::CrawlConfig;
use crate::crawl::{canonicalize, Crawler};
use crate::error::CrawlError;
use crate::report::{CrawlReport, CrawlResult};

// What the caller asks for
//
// The caller has already authorized the user and debited `credits_to_use`;
// the crawler only logs it.
#[derive(Debug, Clone, Default)]
pub struct CrawlRequest {
    pub target_url: String,
    pub target_urls: Vec<String>,
    pub max_pages: Option<usize>,
    pub credits_to_use: u32,
}

// Runs every requested crawl job and merges the results
//
// Returns: CrawlReport, or a request-level error (InvalidUrl, NoValidTargets)
// raised before any page is fetched
pub async fn run_crawl(crawler: &Crawler, request: CrawlRequest) -> Result<CrawlReport, CrawlError> {
    let targets = resolve_targets(&request)?;
    let max_pages = CrawlConfig::clamp_max_pages(request.max_pages);
    let concurrency = crawler.config().target_concurrency.max(1);

    info!(
        targets = targets.len(),
        max_pages,
        concurrency,
        credits_to_use = request.credits_to_use,
        "Starting crawl request"
    );

    let results: Vec<CrawlResult> = stream::iter(targets.iter())
        .map(|target| crawler.crawl(target, max_pages))
        .buffered(concurrency)
        .try_collect()
        .await?;

    Ok(merge_results(targets, max_pages, results))
}

// Validates, canonicalizes and dedups the requested targets
//
// Blank entries are ignored, so a request may leave target_url empty and
// only fill target_urls.
fn resolve_targets(request: &CrawlRequest) -> Result<Vec<String>, CrawlError> {
    let mut seen = HashSet::new();
    let mut targets = Vec::new();

    let raw_targets = std::iter::once(&request.target_url).chain(request.target_urls.iter());

    for raw in raw_targets {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        let is_web_url = Url::parse(trimmed)
            .map(|url| url.scheme() == "http" || url.scheme() == "https")
            .unwrap_or(false);
        if !is_web_url {
            return Err(CrawlError::InvalidUrl(raw.clone()));
        }

        let canonical = canonicalize(trimmed)?;
        if seen.insert(canonical.clone()) {
            targets.push(canonical);
        }
    }

    if targets.is_empty() {
        return Err(CrawlError::NoValidTargets);
    }

    Ok(targets)
}

// Merges per-job results into one report
//
// - pages: deduped by (url, status, title), first occurrence wins
// - matches: deduped by (page, element, normalized text, href), first occurrence wins
// - pagesVisited: sum over jobs
fn merge_results(targets: Vec<String>, max_pages: usize, results: Vec<CrawlResult>) -> CrawlReport {
    let mut seen_pages = HashSet::new();
    let pages: Vec<_> = results
        .iter()
        .flat_map(|result| result.pages.iter())
        .filter(|page| seen_pages.insert((*page).clone()))
        .cloned()
        .collect();

    let mut seen_matches = HashSet::new();
    let matches: Vec<_> = results
        .iter()
        .flat_map(|result| result.matches.iter())
        .filter(|found| seen_matches.insert(found.dedup_key()))
        .cloned()
        .collect();

    CrawlReport {
        start_url: targets.first().cloned().unwrap_or_default(),
        pages_visited: results.iter().map(|result| result.pages_visited).sum(),
        max_pages_per_target: max_pages,
        total_matches: matches.len(),
        pages,
        matches,
        target_urls: targets,
        per_target_results: results,
    }
}
