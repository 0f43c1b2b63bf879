#![allow(dead_code)]

use async_trait::async_trait;
use shorty::application::services::{RegistrationService, ResolutionService};
use shorty::domain::entities::{Mapping, NewMapping};
use shorty::domain::repositories::MappingRepository;
use shorty::error::StoreError;
use shorty::infrastructure::cache::{CacheService, NullCache};
use shorty::infrastructure::persistence::MemoryMappingRepository;
use shorty::state::AppState;
use std::sync::Arc;

pub const TEST_FALLBACK_URL: &str = "https://docs.example.org/help";

/// State backed by an in-memory store and no cache.
pub fn create_test_state() -> (AppState, Arc<MemoryMappingRepository>) {
    let store = Arc::new(MemoryMappingRepository::new());
    (state_with_store(store.clone()), store)
}

pub fn state_with_store(store: Arc<dyn MappingRepository>) -> AppState {
    let cache: Arc<dyn CacheService> = Arc::new(NullCache::new());

    AppState::from_services(
        store.clone(),
        cache.clone(),
        RegistrationService::with_defaults(store.clone()),
        ResolutionService::new(store, cache, TEST_FALLBACK_URL),
    )
}

pub async fn create_test_mapping(store: &MemoryMappingRepository, code: &str, destination: &str) {
    store
        .insert(NewMapping {
            code: code.to_string(),
            destination: destination.to_string(),
        })
        .await
        .unwrap();
}

/// Store whose every operation fails as if the database were unreachable.
pub struct UnavailableStore;

#[async_trait]
impl MappingRepository for UnavailableStore {
    async fn insert(&self, _new_mapping: NewMapping) -> Result<Mapping, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<Mapping>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find_by_destination(
        &self,
        _destination: &str,
    ) -> Result<Option<Mapping>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}
