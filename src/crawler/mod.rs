//! Crawler module for page fetching and export orchestration
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with Content-Type checks
//! - HTML parsing for links, title and description
//! - The breadth-first frontier and visited set
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{format_document, CrawlReport, Orchestrator};
pub use fetcher::{build_http_client, fetch_page, is_html, FetchError, FetchedPage};
pub use frontier::Frontier;
pub use parser::{parse_html, ParsedPage, MAX_DESCRIPTION_CHARS, UNTITLED};

use crate::config::Config;
use crate::render::MarkdownRenderer;
use crate::SweepError;
use std::sync::Arc;

/// Runs a complete export with the default Markdown renderer
///
/// This is the main entry point for a one-shot export. It will:
/// 1. Probe the renderer
/// 2. Seed the frontier and prepare the output directory
/// 3. Traverse breadth-first until the frontier is empty or `max_pages` is hit
/// 4. Write the index documents and, if enabled, the ZIP archive
pub async fn export(config: Config) -> Result<CrawlReport, SweepError> {
    Orchestrator::new(config, Arc::new(MarkdownRenderer::new()))?
        .run()
        .await
}
