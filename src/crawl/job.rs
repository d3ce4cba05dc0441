// src/crawl/job.rs
// =============================================================================
// This module runs one crawl job: a bounded breadth-first walk over a site.
//
// How it works:
// 1. Seed the queue with the (canonical) start URL, marked priority
// 2. Pop the next URL and mark it visited
// 3. Fetch it; failures become PageRecords and the loop moves on
// 4. Scan the HTML for links/buttons/inputs, resolving relative hrefs
//    against the URL the page was served from (after redirects)
// 5. Flag candidates that contain contact phrases as Matches
// 6. Queue same-origin links, contact-looking ones first
// 7. Repeat while the queue is non-empty and fewer than max_pages URLs
//    were visited
//
// All job state (queue, visited set, match dedup set) lives in a CrawlJob
// value owned by a single crawl() call, so independent jobs never share
// mutable state.
//
// Rust concepts:
// - Borrowing: CrawlJob borrows the phrase table instead of copying it
// - while/let-else: loop until the budget is spent or the queue runs dry
// =============================================================================

use std::collections::HashSet;

use reqwest::Client;
use scraper::Html;
use tracing::{debug, info, warn};
use url::Url;

use super::canonical::{canonicalize, canonicalize_url, resolve_href};
use super::fetch::{build_client, fetch_page, HtmlPage};
use super::queue::CrawlQueue;
use crate::config::CrawlConfig;
use crate::contact::{extract_candidates, extract_title, Candidate, PhraseTable};
use crate::error::CrawlError;
use crate::report::{CrawlResult, ElementKind, Match, PageRecord, PageStatus};

// Binary/media files we never fetch
const BLOCKED_EXTENSIONS: [&str; 10] = [
    ".pdf", ".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp", ".zip", ".rar", ".mp4",
];

// Everything a crawl needs that outlives a single job:
// the pooled HTTP client, the settings and the phrase table
pub struct Crawler {
    client: Client,
    config: CrawlConfig,
    phrases: PhraseTable,
}

impl Crawler {
    pub fn new(config: CrawlConfig, phrases: PhraseTable) -> Result<Self, CrawlError> {
        let client = build_client(&config)?;
        Ok(Self {
            client,
            config,
            phrases,
        })
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    // Crawls one site starting from start_url
    //
    // Parameters:
    //   start_url: where to start (canonicalized before use)
    //   max_pages: how many distinct URLs this job may visit
    //
    // Returns: the job's CrawlResult. Only an unparseable start URL is an
    // error; every per-page failure is recorded in `pages` instead.
    pub async fn crawl(&self, start_url: &str, max_pages: usize) -> Result<CrawlResult, CrawlError> {
        let start = canonicalize(start_url)?;
        let origin =
            Url::parse(&start).map_err(|_| CrawlError::InvalidUrl(start_url.to_string()))?;

        info!(start_url = %start, max_pages, "Starting crawl job");

        let mut job = CrawlJob::new(origin, &self.phrases);
        job.queue.push(start.clone(), true);

        while !job.queue.is_empty() && job.queue.visited_count() < max_pages {
            let Some(entry) = job.queue.pop() else {
                break;
            };

            debug!(url = %entry.url, priority = entry.priority, "Fetching page");

            match fetch_page(&self.client, &entry.url).await {
                Ok(page) => job.scan_page(entry.url, page),
                Err(e) => {
                    warn!(url = %entry.url, error = %e, "Page unavailable");
                    job.pages.push(e.into_record(entry.url));
                }
            }
        }

        let result = job.finish(start, max_pages);
        info!(
            start_url = %result.start_url,
            pages_visited = result.pages_visited,
            total_matches = result.total_matches,
            "Crawl job finished"
        );
        Ok(result)
    }
}

// Checks whether a discovered link belongs in this job's queue
//
// Rules:
// - Scheme must be http or https
// - Host must be exactly the start URL's host
// - Path must not end in a blocked binary/media extension
pub fn should_visit(origin: &Url, candidate: &Url) -> bool {
    if candidate.scheme() != "http" && candidate.scheme() != "https" {
        return false;
    }

    match (origin.host_str(), candidate.host_str()) {
        (Some(origin_host), Some(host)) if origin_host == host => {}
        _ => return false,
    }

    let path = candidate.path().to_ascii_lowercase();
    !BLOCKED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

// State owned by one in-flight job
struct CrawlJob<'a> {
    origin: Url,
    phrases: &'a PhraseTable,
    queue: CrawlQueue,
    pages: Vec<PageRecord>,
    matches: Vec<Match>,
    seen_matches: HashSet<(String, ElementKind, String, String)>,
}

impl<'a> CrawlJob<'a> {
    fn new(origin: Url, phrases: &'a PhraseTable) -> Self {
        Self {
            origin,
            phrases,
            queue: CrawlQueue::new(),
            pages: Vec::new(),
            matches: Vec::new(),
            seen_matches: HashSet::new(),
        }
    }

    // Records the page, then turns its candidates into matches and queue entries
    //
    // `url` is the canonical URL we requested and stays the provenance key;
    // hrefs resolve against page.final_url.
    fn scan_page(&mut self, url: String, page: HtmlPage) {
        let (title, candidates) = {
            let document = Html::parse_document(&page.body);
            (extract_title(&document), extract_candidates(&document, &url))
        };

        self.pages.push(PageRecord {
            url,
            status: PageStatus::Http(page.status),
            title: title.clone(),
        });

        for candidate in candidates {
            let target = resolve_href(&page.final_url, &candidate.href).map(canonicalize_url);

            let matched = self
                .phrases
                .match_phrases(&format!("{} {}", candidate.text, candidate.href));
            if !matched.is_empty() {
                self.record_match(&candidate, &title, target.as_ref(), matched);
            }

            if let Some(target) = target {
                self.enqueue(&candidate, target);
            }
        }
    }

    fn record_match(
        &mut self,
        candidate: &Candidate,
        page_title: &str,
        target: Option<&Url>,
        matched_phrases: Vec<String>,
    ) {
        let href = match target {
            Some(url) => url.to_string(),
            None => candidate.href.clone(),
        };

        let found = Match {
            page_url: candidate.page_url.clone(),
            page_title: page_title.to_string(),
            element: candidate.kind,
            text: candidate.text.clone(),
            href,
            matched_phrases,
        };

        if self.seen_matches.insert(found.dedup_key()) {
            debug!(page = %found.page_url, text = %found.text, "Contact match");
            self.matches.push(found);
        }
    }

    fn enqueue(&mut self, candidate: &Candidate, target: Url) {
        if !should_visit(&self.origin, &target) || self.queue.is_visited(target.as_str()) {
            return;
        }

        let priority = self
            .phrases
            .is_priority_url(&format!("{} {}", candidate.text, target));
        let url = target.to_string();
        if self.queue.push(url.clone(), priority) {
            debug!(url = %url, priority, "Queued link");
        }
    }

    fn finish(self, start_url: String, max_pages: usize) -> CrawlResult {
        CrawlResult {
            start_url,
            pages_visited: self.queue.visited_count(),
            max_pages,
            total_matches: self.matches.len(),
            pages: self.pages,
            matches: self.matches,
        }
    }
}
