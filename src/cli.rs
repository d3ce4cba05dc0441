// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use clap's "derive" API: the CLI structure is written as Rust structs
// and enums, and clap generates the parsing, --help and --version for us.
// =============================================================================

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "contact-scout",
    version,
    about = "Crawl websites for contact links, buttons and forms",
    long_about = "contact-scout crawls one or more websites (same host only, bounded page budget) \
                  and reports every link, button or submit input that looks like a way to \
                  contact the business: \"Contact us\", \"Fale conosco\", WhatsApp, support chat, ..."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log every fetch and queued link (same as RUST_LOG=contact_scout=debug)
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl one or more sites and report contact affordances
    ///
    /// Example: contact-scout crawl https://example.com --also https://example.com.br --max-pages 12
    Crawl {
        /// Primary website URL to crawl (e.g., https://example.com)
        target_url: String,

        /// Additional website URLs to crawl (repeatable)
        ///
        /// Duplicates of the primary URL (after canonicalization) are crawled once.
        #[arg(long = "also", value_name = "URL")]
        target_urls: Vec<String>,

        /// Pages to visit per target (clamped to 1..=25, default 8)
        #[arg(long)]
        max_pages: Option<usize>,

        /// Credits the caller debited for this crawl (recorded in the logs)
        #[arg(long, default_value_t = 1)]
        credits: u32,

        /// Per-request timeout in seconds (at least 1)
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: u64,

        /// How many targets to crawl at the same time
        #[arg(long, default_value_t = 1)]
        concurrency: usize,

        /// Extra phrase that counts as "contact" (repeatable, e.g. --phrase kontakt)
        #[arg(long = "phrase", value_name = "TEXT")]
        phrases: Vec<String>,

        /// Output the full report as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
}
