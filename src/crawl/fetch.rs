// src/crawl/fetch.rs
// =============================================================================
// This module fetches a single page and classifies what came back.
//
// A crawl visits many pages and some of them WILL fail. None of these
// failures stop the crawl; each one becomes a PageRecord:
// - Network failure or timeout -> status "network_error", title "Unavailable"
// - Non-2xx response           -> status code, title "Unavailable"
// - Not HTML (PDF, JSON, ...)  -> status code, title "Skipped (<content-type>)"
//
// Rust concepts:
// - thiserror: a typed error enum for the per-page failure modes
// - reqwest::Client: one client shared by every job (connection pooling)
// =============================================================================

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{redirect, Client};
use thiserror::Error;
use url::Url;

use crate::config::CrawlConfig;
use crate::report::{PageRecord, PageStatus};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml";

// A page that came back 2xx with an HTML content type
#[derive(Debug, Clone)]
pub struct HtmlPage {
    pub status: u16,
    /// Where the body was actually served from, after redirects.
    /// Relative links on the page resolve against this, not the requested URL.
    pub final_url: Url,
    pub body: String,
}

// Why a page could not be scanned
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("HTTP {0}")]
    Http(u16),

    #[error("Skipped non-HTML content ({content_type})")]
    Skipped { status: u16, content_type: String },
}

impl PageError {
    // Turns the failure into the PageRecord the crawl reports for this URL
    pub fn into_record(self, url: String) -> PageRecord {
        let (status, title) = match self {
            PageError::Timeout | PageError::Network(_) => {
                (PageStatus::NetworkError, "Unavailable".to_string())
            }
            PageError::Http(code) => (PageStatus::Http(code), "Unavailable".to_string()),
            PageError::Skipped {
                status,
                content_type,
            } => (PageStatus::Http(status), format!("Skipped ({})", content_type)),
        };

        PageRecord { url, status, title }
    }
}

impl From<reqwest::Error> for PageError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            PageError::Timeout
        } else {
            PageError::Network(error)
        }
    }
}

// Creates the HTTP client shared by every crawl job
//
// - Follows redirects (up to config.max_redirects)
// - Times out each request after config.request_timeout
// - No cookie store: nothing carries over between requests
pub fn build_client(config: &CrawlConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.request_timeout)
        .redirect(redirect::Policy::limited(config.max_redirects))
        .build()
}

// Fetches a page and returns its HTML
//
// Returns: Ok(HtmlPage) for 2xx HTML responses, PageError otherwise
pub async fn fetch_page(client: &Client, url: &str) -> Result<HtmlPage, PageError> {
    let response = client.get(url).header(ACCEPT, ACCEPT_HTML).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(PageError::Http(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    match content_type {
        Some(ref value) if is_html(value) => {}
        other => {
            return Err(PageError::Skipped {
                status: status.as_u16(),
                content_type: other.unwrap_or_else(|| "unknown".to_string()),
            });
        }
    }

    let final_url = response.url().clone();
    let body = response.text().await?;

    Ok(HtmlPage {
        status: status.as_u16(),
        final_url,
        body,
    })
}

fn is_html(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.contains("text/html") || content_type.contains("application/xhtml+xml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::net::TcpListener;

    fn client() -> Client {
        build_client(&CrawlConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_html_page() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("accept", ACCEPT_HTML)
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body("<title>Home</title>")
            .create_async()
            .await;

        let page = fetch_page(&client(), &server.url()).await.unwrap();
        assert_eq!(page.status, 200);
        assert_eq!(page.body, "<title>Home</title>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_2xx_is_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _gone = server
            .mock("GET", "/gone")
            .with_status(404)
            .create_async()
            .await;

        let url = format!("{}/gone", server.url());
        let err = fetch_page(&client(), &url).await.unwrap_err();
        assert!(matches!(err, PageError::Http(404)));

        let record = err.into_record(url);
        assert_eq!(record.status, PageStatus::Http(404));
        assert_eq!(record.title, "Unavailable");
    }

    #[tokio::test]
    async fn test_non_html_is_skipped() {
        let mut server = mockito::Server::new_async().await;
        let _data = server
            .mock("GET", "/data")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let url = format!("{}/data", server.url());
        let record = fetch_page(&client(), &url)
            .await
            .unwrap_err()
            .into_record(url);
        assert_eq!(record.status, PageStatus::Http(200));
        assert_eq!(record.title, "Skipped (application/json)");
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Nothing listens on port 1
        let url = "http://127.0.0.1:1/".to_string();
        let record = fetch_page(&client(), &url)
            .await
            .unwrap_err()
            .into_record(url);
        assert_eq!(record.status, PageStatus::NetworkError);
        assert_eq!(record.title, "Unavailable");
    }

    #[tokio::test]
    async fn test_redirect_reports_final_url() {
        let mut server = mockito::Server::new_async().await;
        let _moved = server
            .mock("GET", "/blog")
            .with_status(301)
            .with_header("location", "/blog/")
            .create_async()
            .await;
        let _blog = server
            .mock("GET", "/blog/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<title>Blog</title>")
            .create_async()
            .await;

        let page = fetch_page(&client(), &format!("{}/blog", server.url()))
            .await
            .unwrap();
        assert_eq!(page.status, 200);
        assert_eq!(page.final_url.as_str(), format!("{}/blog/", server.url()));
    }

    // Accepts connections and never answers them
    async fn silent_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let client = build_client(&CrawlConfig {
            request_timeout: Duration::from_millis(200),
            ..CrawlConfig::default()
        })
        .unwrap();

        let url = format!("{}/slow", silent_server().await);
        let err = fetch_page(&client, &url).await.unwrap_err();
        assert!(matches!(err, PageError::Timeout), "got {:?}", err);

        let record = err.into_record(url);
        assert_eq!(record.status, PageStatus::NetworkError);
        assert_eq!(record.title, "Unavailable");
    }

    #[test]
    fn test_is_html() {
        assert!(is_html("Text/HTML; charset=UTF-8"));
        assert!(is_html("application/xhtml+xml"));
        assert!(!is_html("application/pdf"));
    }
}
