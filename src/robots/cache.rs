//! Per-origin robots.txt cache
//!
//! Each origin gets one `OnceCell`; concurrent first lookups for the same
//! origin wait on a single in-flight fetch instead of issuing their own.

use crate::robots::{fetch_robots, DisallowRules};
use crate::url::origin_key;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OnceCell};
use url::Url;

type Slot = Arc<OnceCell<Option<Arc<DisallowRules>>>>;

/// robots.txt rules per origin, fetched lazily and kept for one crawl run
pub struct RobotsCache {
    client: Client,
    timeout: Duration,
    entries: Mutex<HashMap<String, Slot>>,
}

impl RobotsCache {
    /// Creates an empty cache that fetches with the given client and timeout
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the disallow rules for the URL's origin
    ///
    /// The first reference to an origin fetches `scheme://host/robots.txt`.
    /// A non-200 response or network failure is cached as `None`, meaning the
    /// origin is unrestricted.
    pub async fn disallowed_prefixes(&self, url: &Url) -> Option<Arc<DisallowRules>> {
        let key = origin_key(url)?;

        let slot = {
            let mut entries = self.entries.lock().await;
            entries.entry(key.clone()).or_default().clone()
        };

        let client = &self.client;
        let timeout = self.timeout;
        let key = key.as_str();

        slot.get_or_init(|| async move {
            match fetch_robots(client, url, timeout).await {
                Ok(rules) => {
                    tracing::debug!(
                        "robots.txt for {}: {} disallowed prefixes",
                        key,
                        rules.prefixes().count()
                    );
                    Some(Arc::new(rules))
                }
                Err(e) => {
                    tracing::debug!("robots.txt for {} unavailable ({}), not restricting", key, e);
                    None
                }
            }
        })
        .await
        .clone()
    }

    /// Number of origins looked up so far
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
