//! Infrastructure layer for external integrations.
//!
//! Implements the interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`cache`] - Read-through cache for resolved codes (Redis or no-op)
//! - [`persistence`] - Mapping store implementations

pub mod cache;
pub mod persistence;
