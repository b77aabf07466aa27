//! Crawl frontier
//!
//! This module handles:
//! - FIFO queue of raw URL strings driving breadth-first traversal
//! - The visited set, keyed on fragment-stripped URLs
//! - Suppressing repeated pushes of the same raw string

use std::collections::{HashSet, VecDeque};
use url::Url;

/// Frontier queue plus visited set for one crawl run
///
/// Entries are raw strings and may carry a fragment. The visited set holds
/// the fragment-stripped form, so two entries that differ only by fragment
/// share one visited key.
#[derive(Debug, Default)]
pub struct Frontier {
    /// URLs waiting to be dequeued, in discovery order
    queue: VecDeque<String>,

    /// Every raw string ever pushed
    seen: HashSet<String>,

    /// Fragment-stripped URLs that have been dequeued
    visited: HashSet<Url>,
}

impl Frontier {
    /// Creates a frontier holding the seeds in order
    pub fn new<I, S>(seeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut frontier = Self::default();
        for seed in seeds {
            frontier.push(seed);
        }
        frontier
    }

    /// Appends a raw URL to the back of the queue
    ///
    /// Returns false if the same raw string was pushed before.
    pub fn push(&mut self, raw: impl Into<String>) -> bool {
        let raw = raw.into();
        if !self.seen.insert(raw.clone()) {
            return false;
        }
        self.queue.push_back(raw);
        true
    }

    /// Removes the head of the queue
    pub fn pop(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    /// Records a fragment-stripped URL as visited
    ///
    /// Returns false if it was already visited, in which case the caller
    /// must discard the entry.
    pub fn mark_visited(&mut self, page: &Url) -> bool {
        self.visited.insert(page.clone())
    }

    pub fn is_visited(&self, page: &Url) -> bool {
        self.visited.contains(page)
    }

    /// Number of URLs still queued
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
