//! No-op cache implementation for testing or disabled caching.

use super::service::{CacheResult, CacheService, DISABLED_BACKEND};
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that stores nothing.
///
/// Used when Redis is not configured or its connection fails at startup.
/// Every lookup is a miss, so resolution always goes to the store.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_destination(&self, _code: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set_destination(
        &self,
        _code: &str,
        _destination: &str,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        DISABLED_BACKEND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_cache_always_misses() {
        let cache = NullCache::new();
        cache
            .set_destination("abcde", "https://example.com", None)
            .await
            .unwrap();

        assert!(cache.get_destination("abcde").await.unwrap().is_none());
        assert!(cache.health_check().await);
    }
}
