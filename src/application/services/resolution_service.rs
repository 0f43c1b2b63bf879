//! Short code resolution service.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::domain::entities::Mapping;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, DISABLED_BACKEND};

/// Default redirect target for codes that do not resolve.
pub const DEFAULT_FALLBACK_URL: &str = "https://mun.day/urlshortener";

fn record(outcome: &'static str) {
    metrics::counter!("shorty_resolutions_total", "outcome" => outcome).increment(1);
}

/// Outcome of resolving a short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(String),
    NotFound,
}

impl Resolution {
    /// Returns the destination, or `fallback` when the code did not resolve.
    pub fn destination_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            Self::Found(destination) => destination,
            Self::NotFound => fallback,
        }
    }
}

/// Resolves short codes to destinations.
///
/// Reads through the cache first; on a miss it queries the store and
/// populates the cache in a detached task. No task is spawned when caching
/// is disabled.
pub struct ResolutionService {
    store: Arc<dyn MappingRepository>,
    cache: Arc<dyn CacheService>,
    fallback_url: String,
}

impl ResolutionService {
    pub fn new(
        store: Arc<dyn MappingRepository>,
        cache: Arc<dyn CacheService>,
        fallback_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            cache,
            fallback_url: fallback_url.into(),
        }
    }

    /// Redirect target for codes that do not resolve.
    pub fn fallback_url(&self) -> &str {
        &self.fallback_url
    }

    /// Looks up `code` in the store, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store timeout or connection failure.
    pub async fn lookup(&self, code: &str) -> Result<Option<Mapping>, AppError> {
        Ok(self.store.find_by_code(code).await?)
    }

    /// Resolves `code` to its destination.
    ///
    /// Store errors are logged and reported as [`Resolution::NotFound`]: the
    /// caller redirects to the fallback URL either way.
    pub async fn resolve(&self, code: &str) -> Resolution {
        match self.cache.get_destination(code).await {
            Ok(Some(destination)) => {
                debug!(code, "Resolved from cache");
                record("cache_hit");
                return Resolution::Found(destination);
            }
            Ok(None) => {}
            Err(e) => warn!(code, error = %e, "Cache lookup failed, falling back to store"),
        }

        match self.store.find_by_code(code).await {
            Ok(Some(mapping)) => {
                debug!(code, "Resolved from store");
                record("found");

                if self.cache.backend() == DISABLED_BACKEND {
                    return Resolution::Found(mapping.destination);
                }

                let cache = self.cache.clone();
                let destination = mapping.destination.clone();
                tokio::spawn(async move {
                    if let Err(e) = cache
                        .set_destination(&mapping.code, &mapping.destination, None)
                        .await
                    {
                        error!("Failed to cache destination: {}", e);
                    }
                });

                Resolution::Found(destination)
            }
            Ok(None) => {
                debug!(code, "Short code not found");
                record("not_found");
                Resolution::NotFound
            }
            Err(e) => {
                warn!(code, error = %e, "Store error while resolving, treating as not found");
                record("store_error");
                Resolution::NotFound
            }
        }
    }
}
