//! State module for crawl accounting
//!
//! - `PageOutcome`: the terminal result of every dequeued frontier entry
//!   (exported, skipped, or failed), used for the run statistics.

mod outcome;

pub use outcome::PageOutcome;
