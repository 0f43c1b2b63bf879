//! Repository trait for short code mappings.

use crate::domain::entities::{Mapping, NewMapping};
use crate::error::StoreError;
use async_trait::async_trait;

/// Storage contract for code -> destination mappings.
///
/// Every operation is bounded by the implementation's operation timeout.
/// A timeout or connectivity failure is reported as
/// [`StoreError::Unavailable`], never as "not found".
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryMappingRepository`] - in-process
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Atomically inserts a new mapping.
    ///
    /// # Errors
    ///
    /// - [`StoreError::DuplicateCode`] if the code is already taken
    /// - [`StoreError::DuplicateDestination`] if the destination already has a code
    /// - [`StoreError::Unavailable`] on timeout or connection failure
    async fn insert(&self, new_mapping: NewMapping) -> Result<Mapping, StoreError>;

    /// Finds a mapping by its exact short code.
    async fn find_by_code(&self, code: &str) -> Result<Option<Mapping>, StoreError>;

    /// Finds the mapping whose destination equals `destination`, if any.
    async fn find_by_destination(&self, destination: &str)
    -> Result<Option<Mapping>, StoreError>;

    /// Counts stored mappings.
    async fn count(&self) -> Result<i64, StoreError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
