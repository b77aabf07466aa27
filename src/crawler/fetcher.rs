//! HTTP fetcher implementation
//!
//! This module handles all page requests for the crawler, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests with redirect following
//! - Content-Type checks so only HTML reaches the renderer
//! - Error classification

use crate::config::FetchConfig;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Maximum redirect hops followed for a single page
const MAX_REDIRECTS: usize = 10;

/// Content types accepted as HTML
const HTML_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];

/// A successfully fetched HTML page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects; relative links resolve against it
    pub final_url: Url,

    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value
    pub content_type: String,

    /// Page body content
    pub body: String,
}

/// Why a page could not be fetched
///
/// Every variant is a per-URL failure: the coordinator counts it and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP status {status_code}")]
    Status { status_code: u16 },

    #[error("not HTML (Content-Type: {content_type})")]
    ContentMismatch { content_type: String },

    #[error("request timeout")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to read body: {0}")]
    Body(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Network(format!("connection failed: {}", e))
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// The same client is shared by page fetches and robots.txt fetches.
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and checks that it is HTML
///
/// # Outcomes
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 200 with an HTML Content-Type | `Ok(FetchedPage)` |
/// | Any other status | `FetchError::Status` |
/// | Non-HTML Content-Type | `FetchError::ContentMismatch` |
/// | Timeout | `FetchError::Timeout` |
/// | Connection / redirect failure | `FetchError::Network` |
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, FetchError> {
    let response = client.get(url.clone()).send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::Status {
            status_code: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html(&content_type) {
        return Err(FetchError::ContentMismatch { content_type });
    }

    let final_url = response.url().clone();
    let body = response
        .text()
        .await
        .map_err(|e| FetchError::Body(e.to_string()))?;

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        content_type,
        body,
    })
}

/// True when a Content-Type header names an HTML media type
pub fn is_html(content_type: &str) -> bool {
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    HTML_TYPES.contains(&media_type.as_str())
}
