//! Token cache
//!
//! Key/value store with a per-entry time to live. The default
//! implementation keeps entries in memory; callers can plug in a shared
//! store by implementing [`TokenCache`].

use super::types::CachedToken;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Key/value store for tokens
#[async_trait]
pub trait TokenCache: Send + Sync {
    /// Value for `key`, unless absent or expired
    async fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key` for `ttl`
    async fn put(&self, key: &str, value: String, ttl: Duration);

    /// Drop `key`
    async fn forget(&self, key: &str);
}

/// In-memory token cache
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenCache {
    entries: Arc<RwLock<HashMap<String, CachedToken>>>,
}

impl MemoryTokenCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenCache for MemoryTokenCache {
    async fn get(&self, key: &str) -> Option<String> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired() => return Some(entry.token.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: evict
        self.entries.write().await.remove(key);
        None
    }

    async fn put(&self, key: &str, value: String, ttl: Duration) {
        let seconds = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let entry = CachedToken::expires_in(value, seconds);
        self.entries.write().await.insert(key.to_string(), entry);
    }

    async fn forget(&self, key: &str) {
        self.entries.write().await.remove(key);
    }
}
