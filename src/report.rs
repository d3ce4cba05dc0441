// src/report.rs
// =============================================================================
// The data the crawler hands back to its caller.
//
// Everything here derives Serialize so the CLI can print it as JSON with
// camelCase keys (startUrl, pagesVisited, ...), the shape the surrounding
// product stores and displays.
//
// Rust concepts:
// - #[serde(rename_all = "camelCase")]: Rust field names stay snake_case
// - Manual Serialize impl: PageStatus is a number OR a string in JSON
// - Hash + Eq: lets records be used as dedup keys in a HashSet
// =============================================================================

use serde::{Serialize, Serializer};

// What kind of element a candidate/match came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Link,
    Button,
    RoleButton,
    Input,
}

// Outcome of fetching one page
//
// Serialized as the bare HTTP status code (e.g. 200, 404) or the string
// "network_error" when no response came back (including timeouts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageStatus {
    Http(u16),
    NetworkError,
}

impl Serialize for PageStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageStatus::Http(code) => serializer.serialize_u16(*code),
            PageStatus::NetworkError => serializer.serialize_str("network_error"),
        }
    }
}

// One record per page the crawler dequeued, success or failure
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PageRecord {
    pub url: String,
    pub status: PageStatus,
    pub title: String,
}

// A contact affordance found on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub page_url: String,
    pub page_title: String,
    pub element: ElementKind,
    pub text: String,
    /// Absolute, canonical href when it resolves; the raw href otherwise
    pub href: String,
    pub matched_phrases: Vec<String>,
}

impl Match {
    /// Dedup key: (page, element kind, normalized text, href)
    pub fn dedup_key(&self) -> (String, ElementKind, String, String) {
        (
            self.page_url.clone(),
            self.element,
            crate::contact::normalize(&self.text),
            self.href.clone(),
        )
    }
}

// Output of one crawl job (one start URL)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    pub start_url: String,
    pub pages_visited: usize,
    pub max_pages: usize,
    pub pages: Vec<PageRecord>,
    pub total_matches: usize,
    pub matches: Vec<Match>,
}

// Output of a whole request: every job merged, plus the per-job results
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlReport {
    pub start_url: String,
    pub target_urls: Vec<String>,
    pub pages_visited: usize,
    pub max_pages_per_target: usize,
    pub pages: Vec<PageRecord>,
    pub total_matches: usize,
    pub matches: Vec<Match>,
    pub per_target_results: Vec<CrawlResult>,
}
