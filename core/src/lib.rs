//! # Civic Connect Core
//!
//! Core business logic and domain layer for the Civic Connect backend.
//! This crate contains the passcode entity, the one-time passcode services,
//! the store and delivery seams they depend on, the session navigation
//! guard, and the domain error types.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
