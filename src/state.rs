//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{RegistrationService, ResolutionService};
use crate::config::Config;
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::cache::CacheService;

/// Handles shared by all request handlers.
///
/// Cloning is cheap: every field is an `Arc`. The store and cache are
/// acquired once at startup and only read through these handles.
#[derive(Clone)]
pub struct AppState {
    pub registration_service: Arc<RegistrationService>,
    pub resolution_service: Arc<ResolutionService>,
    pub store: Arc<dyn MappingRepository>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    /// Builds the services from configuration.
    pub fn new(
        store: Arc<dyn MappingRepository>,
        cache: Arc<dyn CacheService>,
        config: &Config,
    ) -> Self {
        let registration_service = RegistrationService::new(
            store.clone(),
            config.short_code_length,
            config.code_insert_attempts,
        );
        let resolution_service =
            ResolutionService::new(store.clone(), cache.clone(), config.fallback_url.clone());

        Self::from_services(store, cache, registration_service, resolution_service)
    }

    /// Builds the state from already constructed services.
    pub fn from_services(
        store: Arc<dyn MappingRepository>,
        cache: Arc<dyn CacheService>,
        registration_service: RegistrationService,
        resolution_service: ResolutionService,
    ) -> Self {
        Self {
            registration_service: Arc::new(registration_service),
            resolution_service: Arc::new(resolution_service),
            store,
            cache,
        }
    }
}
