//! Mapping repository implementations.
//!
//! - [`PgMappingRepository`] - PostgreSQL via SQLx, used in production
//! - [`MemoryMappingRepository`] - in-process maps, used for local runs and tests

pub mod memory_mapping_repository;
pub mod pg_mapping_repository;

pub use memory_mapping_repository::MemoryMappingRepository;
pub use pg_mapping_repository::PgMappingRepository;
