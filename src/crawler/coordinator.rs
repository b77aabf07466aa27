//! Crawl orchestrator - main export loop
//!
//! This module contains the traversal that ties every other component
//! together:
//! - Managing the frontier and visited set
//! - Applying the scope filter and robots rules
//! - Fetching, slicing, rendering and persisting each page
//! - Discovering and enqueueing outbound links breadth-first
//! - Building the index documents and optional archive at the end

use crate::config::{Config, JobConfig};
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchError};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::{parse_html, ParsedPage};
use crate::output::{
    address_for, build_indexes, ensure_output_dir, map_url, write_atomic, zip_dir, CrawlStats,
    PageRecord,
};
use crate::render::{plain_text, slice_section, Renderer};
use crate::robots::RobotsCache;
use crate::state::PageOutcome;
use crate::url::{split_fragment, strip_fragment, Scope};
use crate::SweepError;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Result of a finished (or interrupted) export run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Exported pages, in the order they were persisted
    pub records: Vec<PageRecord>,

    /// Per-outcome counters
    pub stats: CrawlStats,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// True when the stop handle ended the run early
    pub interrupted: bool,

    /// Export root
    pub output_dir: PathBuf,

    /// Path of the ZIP archive, when one was written
    pub archive: Option<PathBuf>,
}

impl CrawlReport {
    pub fn elapsed_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

/// Owns all state for one export run
///
/// The frontier, visited set and robots cache belong to this instance, so
/// independent runs never share state.
pub struct Orchestrator {
    job: JobConfig,
    scope: Scope,
    client: Client,
    robots: RobotsCache,
    renderer: Arc<dyn Renderer>,
    frontier: Frontier,
    output_root: PathBuf,
    records: Vec<PageRecord>,
    /// Relative paths already exported this run
    written: HashSet<String>,
    stats: CrawlStats,
    stop: Arc<AtomicBool>,
}

impl Orchestrator {
    /// Creates a new orchestrator instance
    ///
    /// The renderer is probed first; if it cannot render, the run is aborted
    /// before any network traffic.
    ///
    /// # Errors
    ///
    /// * `SweepError::RendererUnavailable` - The renderer probe failed
    /// * `SweepError::EmptyFrontier` - No seed remained after trimming
    /// * `SweepError::Url` - A seed is not an absolute http(s) URL
    /// * `SweepError::Persist` - The output directory is not usable
    pub fn new(config: Config, renderer: Arc<dyn Renderer>) -> Result<Self, SweepError> {
        renderer
            .probe()
            .map_err(|e| SweepError::RendererUnavailable {
                renderer: renderer.name().to_string(),
                remedy: format!(
                    "startup probe failed ({}); check that the renderer is installed and working, then rerun",
                    e
                ),
            })?;

        let mut job = config.job;
        job.seeds = job
            .seeds
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if job.seeds.is_empty() {
            return Err(SweepError::EmptyFrontier);
        }

        let scope = Scope::from_job(&job)?;
        let client = build_http_client(&config.fetch)?;
        let robots = RobotsCache::new(
            client.clone(),
            Duration::from_secs(config.fetch.robots_timeout_secs),
        );
        let frontier = Frontier::new(job.seeds.iter().cloned());

        let output_root = PathBuf::from(&job.output_dir);
        ensure_output_dir(&output_root)?;

        Ok(Self {
            job,
            scope,
            client,
            robots,
            renderer,
            frontier,
            output_root,
            records: Vec::new(),
            written: HashSet::new(),
            stats: CrawlStats::default(),
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Handle that ends the run before the next dequeue when set
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Runs the traversal to completion, then writes indexes and the archive
    ///
    /// Per-URL failures are counted, never returned. Errors here come only
    /// from writing the index documents or the archive.
    pub async fn run(mut self) -> Result<CrawlReport, SweepError> {
        let started_at = Utc::now();
        let max_pages = self.job.max_pages;
        let mut interrupted = false;

        tracing::info!(
            "Starting export: {} seed(s), max {} pages, output {}",
            self.job.seeds.len(),
            max_pages,
            self.output_root.display()
        );

        while self.records.len() < max_pages {
            if self.stop.load(Ordering::SeqCst) {
                tracing::info!("Stop requested, finishing with {} pages", self.records.len());
                interrupted = true;
                break;
            }

            let Some(raw) = self.frontier.pop() else {
                tracing::info!("Frontier is empty, crawl complete");
                break;
            };

            let outcome = self.step(&raw).await;
            self.stats.record(outcome);
        }

        if self.records.len() >= max_pages {
            tracing::info!(
                "Reached max pages ({}), {} URLs left in frontier",
                max_pages,
                self.frontier.len()
            );
        }

        build_indexes(&self.output_root, &self.records)?;

        let archive = if self.job.make_zip {
            Some(zip_dir(&self.output_root)?)
        } else {
            None
        };

        Ok(CrawlReport {
            records: self.records,
            stats: self.stats,
            started_at,
            finished_at: Utc::now(),
            interrupted,
            output_dir: self.output_root,
            archive,
        })
    }

    /// Processes one dequeued frontier entry
    async fn step(&mut self, raw: &str) -> PageOutcome {
        let split = match split_fragment(raw) {
            Ok(split) => split,
            Err(e) => {
                tracing::debug!("Skipping unparseable URL {}: {}", raw, e);
                return PageOutcome::OutOfScope;
            }
        };

        if !self.frontier.mark_visited(&split.page) {
            tracing::debug!("Already visited: {}", split.page);
            return PageOutcome::Duplicate;
        }

        if let Some(outcome) = self.rejection(&split.page).await {
            tracing::debug!("URL {} rejected: {}", split.page, outcome);
            return outcome;
        }

        // `/a` and `/a/` share one export file
        if let Ok(address) = address_for(raw, &self.output_root) {
            if self.written.contains(&address.relative_path) {
                tracing::debug!("{} maps to exported {}", raw, address.relative_path);
                return PageOutcome::Duplicate;
            }
        }

        let page = match fetch_page(&self.client, &split.page).await {
            Ok(page) => page,
            Err(FetchError::ContentMismatch { content_type }) => {
                tracing::debug!("Skipping {}: Content-Type {}", raw, content_type);
                return PageOutcome::ContentMismatch;
            }
            Err(e) => {
                tracing::warn!("Fetch failed for {}: {}", raw, e);
                return PageOutcome::FetchFailed;
            }
        };

        let section = match (&split.fragment, self.job.include_fragments) {
            (Some(fragment), true) => {
                let section = slice_section(&page.body, fragment);
                if section.is_none() {
                    tracing::debug!("No anchor '{}' in {}, exporting full page", fragment, split.page);
                }
                section
            }
            _ => None,
        };

        let html = section.as_deref().unwrap_or(page.body.as_str());
        let markdown = self.render(&page.final_url, html);
        let parsed = parse_html(&page.body, &page.final_url);

        let record = match self.persist(raw, &parsed, &markdown) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Failed to save {}: {}", raw, e);
                return PageOutcome::PersistFailed;
            }
        };

        if section.is_some() {
            self.stats.fragment_sections += 1;
        }
        self.written.insert(record.relative_path.clone());
        self.records.push(record);
        tracing::info!(
            "[{}/{}] Saved: {}",
            self.records.len(),
            self.job.max_pages,
            parsed.title
        );

        if self.records.len() < self.job.max_pages {
            self.discover(&parsed.links).await;
        }

        PageOutcome::Exported
    }

    /// Returns the skip outcome for a URL outside the crawl boundary
    async fn rejection(&self, page: &Url) -> Option<PageOutcome> {
        if !self.scope.allows(page, None) {
            return Some(PageOutcome::OutOfScope);
        }

        if self.scope.obey_robots() {
            let rules = self.robots.disallowed_prefixes(page).await;
            if !self.scope.allows(page, rules.as_deref()) {
                return Some(PageOutcome::RobotsDenied);
            }
        }

        None
    }

    /// Renders with the configured renderer, falling back to plain text
    fn render(&mut self, url: &Url, html: &str) -> String {
        match self.renderer.render(url, html) {
            Ok(markdown) => markdown,
            Err(e) => {
                tracing::warn!(
                    "Renderer {} failed for {}: {}; using plain text",
                    self.renderer.name(),
                    url,
                    e
                );
                self.stats.render_fallbacks += 1;
                plain_text(html)
            }
        }
    }

    /// Writes the page document and builds its record
    fn persist(
        &self,
        raw: &str,
        parsed: &ParsedPage,
        markdown: &str,
    ) -> Result<PageRecord, SweepError> {
        let address = map_url(raw, &self.output_root)?;
        write_atomic(&address.path, &format_document(&parsed.title, raw, markdown))?;

        Ok(PageRecord {
            url: raw.to_string(),
            file_path: address.path,
            relative_path: address.relative_path,
            title: parsed.title.clone(),
            description: parsed.description.clone(),
        })
    }

    /// Enqueues unvisited in-scope links in document order
    async fn discover(&mut self, links: &[Url]) {
        let mut queued = 0;
        for link in links {
            let page = strip_fragment(link);
            if self.frontier.is_visited(&page) {
                continue;
            }
            if self.rejection(&page).await.is_some() {
                continue;
            }
            if self.frontier.push(page.to_string()) {
                queued += 1;
            }
        }
        tracing::debug!("Queued {} of {} links", queued, links.len());
    }
}

/// Page document: title heading, source line, rendered body
pub fn format_document(title: &str, source: &str, markdown: &str) -> String {
    format!("# {}\n\n> Source: {}\n\n{}\n", title, source, markdown.trim_end())
}
