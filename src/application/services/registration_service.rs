//! Short code registration service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::{AppError, StoreError};
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, generate_code, is_reserved};
use crate::utils::url_normalizer::normalize_url;

/// Default number of insert attempts before a collision becomes an error.
pub const DEFAULT_INSERT_ATTEMPTS: usize = 3;

fn record(outcome: &'static str) {
    metrics::counter!("shorty_registrations_total", "outcome" => outcome).increment(1);
}

/// Issues short codes for destination URLs.
///
/// Enforces that one destination maps to at most one code. Holds no state
/// between calls besides its configuration and the shared store handle.
pub struct RegistrationService {
    store: Arc<dyn MappingRepository>,
    code_length: usize,
    max_attempts: usize,
}

impl RegistrationService {
    /// Creates a registration service.
    ///
    /// `max_attempts` is clamped to at least one attempt.
    pub fn new(store: Arc<dyn MappingRepository>, code_length: usize, max_attempts: usize) -> Self {
        Self {
            store,
            code_length,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Creates a service with 5-character codes and the default number of insert attempts.
    pub fn with_defaults(store: Arc<dyn MappingRepository>) -> Self {
        Self::new(store, DEFAULT_CODE_LENGTH, DEFAULT_INSERT_ATTEMPTS)
    }

    /// Registers `raw_url` and returns the created mapping.
    ///
    /// # Steps
    ///
    /// 1. Normalize and validate the URL
    /// 2. Reject destinations that already have a code
    /// 3. Generate a candidate code
    /// 4. Insert; on a code collision go back to step 3 until the insert
    ///    attempts are spent
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidFormat`] if the URL fails validation
    /// - [`AppError::AlreadyExists`] if the destination is already registered.
    ///   The existing code is not disclosed.
    /// - [`AppError::DuplicateKey`] if every attempt collided
    /// - [`AppError::StoreUnavailable`] on store timeout or connection failure
    pub async fn register(&self, raw_url: &str) -> Result<Mapping, AppError> {
        let destination = normalize_url(raw_url).map_err(|e| {
            record("invalid_format");
            AppError::invalid_format(e.to_string(), json!({ "url": raw_url }))
        })?;

        if self
            .store
            .find_by_destination(&destination)
            .await
            .inspect_err(|_| record("store_unavailable"))?
            .is_some()
        {
            debug!(%destination, "Destination already registered");
            record("already_exists");
            return Err(AppError::already_exists("Record already exists", json!({})));
        }

        for attempt in 1..=self.max_attempts {
            let new_mapping = NewMapping {
                code: self.next_code(),
                destination: destination.clone(),
            };

            match self.store.insert(new_mapping).await {
                Ok(mapping) => {
                    info!(code = %mapping.code, destination = %mapping.destination, "Short code registered");
                    record("created");
                    return Ok(mapping);
                }
                Err(StoreError::DuplicateCode) => {
                    warn!(attempt, max_attempts = self.max_attempts, "Short code collision");
                }
                Err(e) => {
                    record(match e {
                        StoreError::DuplicateDestination => "already_exists",
                        _ => "store_unavailable",
                    });
                    return Err(e.into());
                }
            }
        }

        record("duplicate_key");
        Err(AppError::duplicate_key(
            "Failed to generate unique code",
            json!({ "attempts": self.max_attempts }),
        ))
    }

    fn next_code(&self) -> String {
        loop {
            let code = generate_code(self.code_length);
            if !is_reserved(&code) {
                return code;
            }
        }
    }
}
