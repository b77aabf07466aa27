//! Robots.txt parser implementation
//!
//! A best-effort matcher: only the `Disallow` lines of wildcard (`*`)
//! user-agent groups are honored, and matching is a plain path-prefix test.

use std::collections::BTreeSet;

/// Disallowed path prefixes collected from a robots.txt body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisallowRules {
    prefixes: BTreeSet<String>,
}

impl DisallowRules {
    /// Parses robots.txt content
    ///
    /// Lines are scanned in order. Every `User-agent` line switches the active
    /// group on or off depending on whether its value is `*`; while the
    /// wildcard group is active, non-empty `Disallow` values are collected.
    /// Unknown directives and malformed lines are ignored.
    pub fn parse(content: &str) -> Self {
        let mut prefixes = BTreeSet::new();
        let mut in_wildcard_group = false;

        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some((key, value)) = trimmed.split_once(':') else {
                continue;
            };
            let value = strip_comment(value);

            match key.trim().to_lowercase().as_str() {
                "user-agent" => in_wildcard_group = value == "*",
                "disallow" if in_wildcard_group && !value.is_empty() => {
                    prefixes.insert(value.to_string());
                }
                _ => {}
            }
        }

        Self { prefixes }
    }

    /// Checks a URL path against the collected prefixes
    ///
    /// # Returns
    ///
    /// * `true` - If no prefix matches the start of `path`
    /// * `false` - If the path falls under a disallowed prefix
    pub fn is_allowed(&self, path: &str) -> bool {
        !self.prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Returns the disallowed prefixes in sorted order
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

fn strip_comment(value: &str) -> &str {
    match value.split_once('#') {
        Some((before, _)) => before.trim(),
        None => value.trim(),
    }
}
