//! Scope filter: decides whether a URL may be enqueued or fetched
//!
//! Each check is a pure function of its inputs so it can be tested alone;
//! [`Scope::allows`] is their conjunction.

use crate::config::JobConfig;
use crate::robots::DisallowRules;
use crate::url::{extract_host, split_fragment};
use crate::UrlError;
use url::Url;

/// The crawl boundary derived from a job
#[derive(Debug, Clone)]
pub struct Scope {
    seed_hosts: Vec<String>,
    same_domain: bool,
    path_prefix: Option<String>,
    obey_robots: bool,
}

impl Scope {
    /// Builds the scope for a job, parsing every seed for its host
    pub fn from_job(job: &JobConfig) -> Result<Self, UrlError> {
        let mut seed_hosts = Vec::with_capacity(job.seeds.len());
        for seed in &job.seeds {
            let split = split_fragment(seed)?;
            let host = extract_host(&split.page).ok_or(UrlError::MissingHost)?;
            if !seed_hosts.contains(&host) {
                seed_hosts.push(host);
            }
        }

        Ok(Self {
            seed_hosts,
            same_domain: job.same_domain,
            path_prefix: job.path_prefix.clone().filter(|p| !p.is_empty()),
            obey_robots: job.obey_robots,
        })
    }

    /// Whether robots.txt rules must be consulted for this scope
    pub fn obey_robots(&self) -> bool {
        self.obey_robots
    }

    /// Checks domain, path prefix and robots rules for a URL
    ///
    /// `robots` is the disallow set recorded for the URL's origin; `None`
    /// means the origin is unrestricted.
    pub fn allows(&self, url: &Url, robots: Option<&DisallowRules>) -> bool {
        let domain_ok = !self.same_domain || matches_seed_host(url, &self.seed_hosts);
        let robots_ok = !self.obey_robots || is_allowed_by_robots(url, robots);
        domain_ok && is_under_prefix(url, self.path_prefix.as_deref()) && robots_ok
    }
}

/// True when the URL's host equals one of the (lowercase) seed hosts
pub fn matches_seed_host(url: &Url, seed_hosts: &[String]) -> bool {
    match extract_host(url) {
        Some(host) => seed_hosts.iter().any(|seed| seed.eq_ignore_ascii_case(&host)),
        None => false,
    }
}

/// True when no prefix is configured or the URL path starts with it
///
/// Only the path component is compared; query and fragment are ignored.
pub fn is_under_prefix(url: &Url, prefix: Option<&str>) -> bool {
    match prefix {
        Some(prefix) => url_path(url).starts_with(prefix),
        None => true,
    }
}

/// True when the URL path does not start with any disallowed prefix
pub fn is_allowed_by_robots(url: &Url, rules: Option<&DisallowRules>) -> bool {
    match rules {
        Some(rules) => rules.is_allowed(url_path(url)),
        None => true,
    }
}

fn url_path(url: &Url) -> &str {
    match url.path() {
        "" => "/",
        path => path,
    }
}
