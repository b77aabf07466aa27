//! Run statistics
//!
//! Counts the outcome of every dequeued frontier entry and prints the
//! end-of-run summary.

use crate::crawler::CrawlReport;
use crate::state::PageOutcome;
use std::collections::BTreeMap;

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStats {
    /// Count of dequeued entries by outcome
    outcomes: BTreeMap<PageOutcome, u64>,

    /// Pages whose renderer failed and were exported as plain text
    pub render_fallbacks: u64,

    /// Pages exported as a `#fragment` section rather than the full page
    pub fragment_sections: u64,
}

impl CrawlStats {
    pub fn record(&mut self, outcome: PageOutcome) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
    }

    pub fn count(&self, outcome: PageOutcome) -> u64 {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Total frontier entries that reached a terminal outcome
    pub fn dequeued(&self) -> u64 {
        self.outcomes.values().sum()
    }

    pub fn exported(&self) -> u64 {
        self.count(PageOutcome::Exported)
    }

    /// Entries that passed the scope filter but could not be exported
    pub fn errors(&self) -> u64 {
        self.outcomes
            .iter()
            .filter(|(outcome, _)| outcome.is_error())
            .map(|(_, count)| count)
            .sum()
    }
}

/// Prints the run summary to stdout in a formatted manner
pub fn print_statistics(report: &CrawlReport) {
    let stats = &report.stats;

    println!("=== Export Summary ===\n");
    println!("  Files:    {}", report.records.len());
    println!("  Output:   {}", report.output_dir.display());
    println!("  Time (s): {:.1}", report.elapsed_seconds());
    if let Some(archive) = &report.archive {
        println!("  ZIP:      {}", archive.display());
    }
    if report.interrupted {
        println!("  (interrupted: export covers completed pages only)");
    }
    println!();

    println!("URLs by Outcome:");
    for outcome in PageOutcome::all() {
        let count = stats.count(outcome);
        if count > 0 {
            println!("  {}: {}", outcome, count);
        }
    }
    println!();

    if stats.fragment_sections > 0 {
        println!("Fragment sections exported: {}", stats.fragment_sections);
    }
    if stats.render_fallbacks > 0 {
        println!("Plain-text fallbacks: {}", stats.render_fallbacks);
    }

    let attempted = stats.exported() + stats.errors();
    let success_rate = if attempted > 0 {
        (stats.exported() as f64 / attempted as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "Success Rate: {:.1}% ({} / {} in-scope pages exported)",
        success_rate,
        stats.exported(),
        attempted
    );
}
