//! URL handling module for Docsweep
//!
//! This module provides host extraction, fragment splitting, and the scope
//! filter that decides which URLs belong to the crawl.

mod domain;
mod fragment;
mod scope;

// Re-export main functions
pub use domain::{extract_host, origin_key};
pub use fragment::{split_fragment, strip_fragment, SplitUrl};
pub use scope::{is_allowed_by_robots, is_under_prefix, matches_seed_host, Scope};
