// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, written to stderr)
// 3. Run the crawl request
// 4. Print the report as tables or JSON
// 5. Exit with proper code (0 = contact found, 1 = nothing found, 2 = error)
// =============================================================================

mod cli;          // src/cli.rs - command-line parsing
mod config;       // src/config.rs - crawler settings
mod contact;      // src/contact/ - markup scanning and phrase matching
mod crawl;        // src/crawl/ - single-site crawling
mod error;        // src/error.rs - request-level errors
mod orchestrator; // src/orchestrator.rs - multi-target requests
mod report;       // src/report.rs - report data types

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};
use config::CrawlConfig;
use contact::PhraseTable;
use crawl::Crawler;
use orchestrator::CrawlRequest;
use report::{CrawlReport, ElementKind, PageStatus};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = at least one contact affordance found
//   Ok(1) = crawl finished, nothing found
//   Err   = the request itself failed (invalid URL, no targets, ...)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Crawl {
            target_url,
            target_urls,
            max_pages,
            credits,
            timeout,
            concurrency,
            phrases,
            json,
        } => {
            let config = CrawlConfig {
                request_timeout: Duration::from_secs(timeout),
                target_concurrency: concurrency,
                ..CrawlConfig::default()
            };
            let phrases = PhraseTable::default().with_extra_phrases(phrases);

            let request = CrawlRequest {
                target_url,
                target_urls,
                max_pages,
                credits_to_use: credits,
            };

            handle_crawl(config, phrases, request, json).await
        }
    }
}

// Logs go to stderr so `--json` output on stdout stays machine-readable.
// RUST_LOG wins over --verbose when both are set.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "contact_scout=debug"
    } else {
        "contact_scout=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn handle_crawl(
    config: CrawlConfig,
    phrases: PhraseTable,
    request: CrawlRequest,
    json: bool,
) -> Result<i32> {
    let crawler = Crawler::new(config, phrases)?;

    if !json {
        println!("🔍 Crawling for contact affordances: {}", request.target_url);
        for extra in &request.target_urls {
            println!("   + {}", extra);
        }
    }

    let report = orchestrator::run_crawl(&crawler, request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_tables(&report);
    }

    if report.total_matches > 0 {
        Ok(0)
    } else {
        Ok(1)
    }
}

fn print_tables(report: &CrawlReport) {
    println!(
        "📄 Visited {} page(s) across {} target(s), max {} per target\n",
        report.pages_visited,
        report.target_urls.len(),
        report.max_pages_per_target
    );

    println!("{:<60} {:<15} {:<30}", "PAGE", "STATUS", "TITLE");
    println!("{}", "=".repeat(105));
    for page in &report.pages {
        let status = match page.status {
            PageStatus::Http(code) => code.to_string(),
            PageStatus::NetworkError => "network_error".to_string(),
        };
        println!("{:<60} {:<15} {:<30}", truncate(&page.url, 57), status, truncate(&page.title, 30));
    }
    println!();

    if report.matches.is_empty() {
        println!("⚠️  No contact affordances found");
        return;
    }

    println!("{:<30} {:<12} {:<60}", "TEXT", "ELEMENT", "HREF");
    println!("{}", "=".repeat(105));
    for found in &report.matches {
        let element = match found.element {
            ElementKind::Link => "link",
            ElementKind::Button => "button",
            ElementKind::RoleButton => "role_button",
            ElementKind::Input => "input",
        };
        println!(
            "{:<30} {:<12} {:<60}",
            truncate(&found.text, 27),
            element,
            truncate(&found.href, 57)
        );
        println!("   on {} [{}]", found.page_url, found.matched_phrases.join(", "));
    }

    println!();
    println!("📊 Summary:");
    println!("   ✅ Matches: {}", report.total_matches);
    println!("   📋 Pages: {}", report.pages.len());
}

// Shortens long cells so the table stays aligned
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
