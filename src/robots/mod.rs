//! Robots.txt handling module
//!
//! This module provides functionality for fetching, parsing, and caching
//! robots.txt files. Fetch failures never abort a crawl: the cache records
//! them as "no restriction".

mod cache;
mod parser;

pub use cache::RobotsCache;
pub use parser::DisallowRules;

use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Why a robots.txt could not be obtained
#[derive(Debug, Error)]
pub enum RobotsError {
    #[error("robots.txt returned HTTP {0}")]
    Status(u16),

    #[error("robots.txt request failed: {0}")]
    Network(String),
}

/// Fetches and parses robots.txt for the origin of `url`
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - Any URL on the origin; only scheme, host and port are used
/// * `timeout` - Request timeout
///
/// # Returns
///
/// * `Ok(DisallowRules)` - robots.txt answered 200 and was parsed
/// * `Err(RobotsError)` - Non-200 status or network failure
pub async fn fetch_robots(
    client: &Client,
    url: &Url,
    timeout: Duration,
) -> Result<DisallowRules, RobotsError> {
    let robots_url = url
        .join("/robots.txt")
        .map_err(|e| RobotsError::Network(e.to_string()))?;

    let response = client
        .get(robots_url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| RobotsError::Network(e.to_string()))?;

    if response.status() != StatusCode::OK {
        return Err(RobotsError::Status(response.status().as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| RobotsError::Network(e.to_string()))?;

    Ok(DisallowRules::parse(&body))
}
