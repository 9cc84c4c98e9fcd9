use std::{
    path::Path,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{constants::CACHE_TTL, error::*, menu::Endpoint};

/// The last successful raw response, keyed by the endpoint it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub url: String,
    /// Entries written before shops were tracked deserialize with an empty id and never match.
    #[serde(default)]
    pub shop_id: String,
    pub body: String,
    /// Seconds since the unix epoch.
    pub stored_at: u64,
}

/// Single-entry cache of the menu document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseCache {
    entry: Option<CacheEntry>,
    #[serde(skip, default = "default_ttl")]
    ttl: Duration,
}

fn default_ttl() -> Duration {
    CACHE_TTL
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(CACHE_TTL)
    }
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self { entry: None, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn entry(&self) -> Option<&CacheEntry> {
        self.entry.as_ref()
    }

    /// The cached body for `endpoint` (same url, same shop), if one was stored
    /// and has not expired.
    pub fn get(&self, endpoint: &Endpoint) -> Option<&str> {
        self.get_at(endpoint, now())
    }

    fn get_at(&self, endpoint: &Endpoint, now: u64) -> Option<&str> {
        let entry = self
            .entry
            .as_ref()
            .filter(|entry| entry.url == endpoint.url && entry.shop_id == endpoint.shop_id)?;
        let age = Duration::from_secs(now.saturating_sub(entry.stored_at));
        if age > self.ttl {
            debug!(url = %entry.url, age_secs = age.as_secs(), "cached menu expired");
            return None;
        }
        Some(entry.body.as_str())
    }

    pub fn put(&mut self, endpoint: &Endpoint, body: String) {
        self.put_at(endpoint, body, now());
    }

    fn put_at(&mut self, endpoint: &Endpoint, body: String, stored_at: u64) {
        self.entry = Some(CacheEntry {
            url: endpoint.url.clone(),
            shop_id: endpoint.shop_id.clone(),
            body,
            stored_at,
        });
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let file_contents = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(file_contents.as_str())?)
    }

    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SaveError> {
        let serialized = serde_json::to_string(self)?;
        tokio::fs::write(path, serialized).await?;
        Ok(())
    }
}
