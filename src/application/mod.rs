//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers and the admin
//! CLI a small API. Both are stateless apart from the injected store and
//! cache handles.
//!
//! # Available Services
//!
//! - [`services::registration_service::RegistrationService`] - Normalize, deduplicate, issue codes
//! - [`services::resolution_service::ResolutionService`] - Resolve codes to destinations

pub mod services;
