/// Per-URL outcome definitions for crawl accounting
///
/// Every dequeued frontier entry ends in exactly one of these outcomes.
use std::fmt;

/// What happened to a frontier entry once it was dequeued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageOutcome {
    // ===== Success =====
    /// Page was rendered, persisted and recorded
    Exported,

    // ===== Skips (not errors) =====
    /// Fragment-stripped form was already visited
    Duplicate,

    /// Rejected by the domain or path-prefix check, or not a crawlable URL
    OutOfScope,

    /// Path falls under a robots.txt disallow prefix
    RobotsDenied,

    // ===== Per-URL failures =====
    /// Network error, timeout or non-200 response
    FetchFailed,

    /// Response was not HTML
    ContentMismatch,

    /// The rendered document could not be written
    PersistFailed,
}

impl PageOutcome {
    /// Returns true if the page made it into the export
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Exported)
    }

    /// Returns true if the entry was skipped without any attempt to fetch it
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Duplicate | Self::OutOfScope | Self::RobotsDenied)
    }

    /// Returns true if the entry failed after passing the scope filter
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed | Self::ContentMismatch | Self::PersistFailed
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exported => "exported",
            Self::Duplicate => "duplicate",
            Self::OutOfScope => "out_of_scope",
            Self::RobotsDenied => "robots_denied",
            Self::FetchFailed => "fetch_failed",
            Self::ContentMismatch => "content_mismatch",
            Self::PersistFailed => "persist_failed",
        }
    }

    /// Returns all possible outcomes
    pub fn all() -> [Self; 7] {
        [
            Self::Exported,
            Self::Duplicate,
            Self::OutOfScope,
            Self::RobotsDenied,
            Self::FetchFailed,
            Self::ContentMismatch,
            Self::PersistFailed,
        ]
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
