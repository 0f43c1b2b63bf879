//! In-process mapping repository.
//!
//! Backs `STORE_BACKEND=memory` for local runs and the handler tests.
//! Contents are lost when the process exits.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::StoreError;

#[derive(Default)]
struct Inner {
    next_id: i64,
    by_code: HashMap<String, Mapping>,
    /// destination -> code
    by_destination: HashMap<String, String>,
}

/// Mapping repository kept in memory behind a single `RwLock`.
///
/// Both uniqueness checks and the insert happen under one write guard, so
/// concurrent inserts of the same code or destination cannot both succeed.
#[derive(Default)]
pub struct MemoryMappingRepository {
    inner: RwLock<Inner>,
}

impl MemoryMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MappingRepository for MemoryMappingRepository {
    async fn insert(&self, new_mapping: NewMapping) -> Result<Mapping, StoreError> {
        let mut inner = self.inner.write().await;

        if inner.by_code.contains_key(&new_mapping.code) {
            return Err(StoreError::DuplicateCode);
        }
        if inner.by_destination.contains_key(&new_mapping.destination) {
            return Err(StoreError::DuplicateDestination);
        }

        inner.next_id += 1;
        let mapping = Mapping::new(
            inner.next_id,
            new_mapping.code,
            new_mapping.destination,
            Utc::now(),
        );

        inner
            .by_destination
            .insert(mapping.destination.clone(), mapping.code.clone());
        inner.by_code.insert(mapping.code.clone(), mapping.clone());

        Ok(mapping)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Mapping>, StoreError> {
        Ok(self.inner.read().await.by_code.get(code).cloned())
    }

    async fn find_by_destination(
        &self,
        destination: &str,
    ) -> Result<Option<Mapping>, StoreError> {
        let inner = self.inner.read().await;

        Ok(inner
            .by_destination
            .get(destination)
            .and_then(|code| inner.by_code.get(code))
            .cloned())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.inner.read().await.by_code.len() as i64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_mapping(code: &str, destination: &str) -> NewMapping {
        NewMapping {
            code: code.to_string(),
            destination: destination.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = MemoryMappingRepository::new();

        let created = repo
            .insert(new_mapping("abcde", "https://example.com"))
            .await
            .unwrap();
        assert_eq!(created.id, 1);

        let by_code = repo.find_by_code("abcde").await.unwrap().unwrap();
        assert_eq!(by_code.destination, "https://example.com");

        let by_destination = repo
            .find_by_destination("https://example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_destination.code, "abcde");

        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_lookup_is_exact() {
        let repo = MemoryMappingRepository::new();
        repo.insert(new_mapping("abcde", "https://example.com"))
            .await
            .unwrap();

        assert!(repo.find_by_code("ABCDE").await.unwrap().is_none());
        assert!(
            repo.find_by_destination("https://example.com/")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected() {
        let repo = MemoryMappingRepository::new();
        repo.insert(new_mapping("abcde", "https://one.com"))
            .await
            .unwrap();

        let result = repo.insert(new_mapping("abcde", "https://two.com")).await;

        assert_eq!(result.unwrap_err(), StoreError::DuplicateCode);
        assert!(repo.find_by_destination("https://two.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_destination_rejected() {
        let repo = MemoryMappingRepository::new();
        repo.insert(new_mapping("abcde", "https://one.com"))
            .await
            .unwrap();

        let result = repo.insert(new_mapping("fghij", "https://one.com")).await;

        assert_eq!(result.unwrap_err(), StoreError::DuplicateDestination);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_ping() {
        assert!(MemoryMappingRepository::new().ping().await.is_ok());
    }
}
