//! Core domain entities.
//!
//! Entities are plain data structures. Creation inputs live in separate
//! structs (`NewMapping`) so that store-assigned fields such as `id` and
//! `created_at` only appear on persisted values.

pub mod mapping;

pub use mapping::{Mapping, NewMapping};
