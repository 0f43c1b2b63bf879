//! Business logic services for the application layer.

pub mod registration_service;
pub mod resolution_service;

pub use registration_service::RegistrationService;
pub use resolution_service::{Resolution, ResolutionService};
