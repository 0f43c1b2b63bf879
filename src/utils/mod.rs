//! Pure helpers used by the services.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_normalizer`] - URL normalization and structural validation

pub mod code_generator;
pub mod url_normalizer;
