//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// [`CacheService::backend`] name of a cache that stores nothing.
pub const DISABLED_BACKEND: &str = "disabled";

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache of resolved `code -> destination` pairs.
///
/// Mappings never change once written, so entries only leave the cache by
/// TTL. Implementations must not let a cache failure fail a request: the
/// resolution service falls back to the store on any error.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached destination for `code`, or `None` on a miss.
    async fn get_destination(&self, code: &str) -> CacheResult<Option<String>>;

    /// Stores a destination for `code`.
    ///
    /// `ttl_seconds = None` uses the implementation default.
    async fn set_destination(
        &self,
        code: &str,
        destination: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name used in health output.
    fn backend(&self) -> &'static str;
}
