//! # Infrastructure Layer
//!
//! Concrete implementations of the seams `cc_core` depends on:
//!
//! - **Cache**: Redis client and the Redis-backed passcode store
//! - **SMS**: SMS providers (Twilio, console mock) and the adapter that
//!   exposes them to the passcode service
//!
//! ## Features
//!
//! - `redis-cache`: Enable Redis caching support (default)
//! - `twilio-sms`: Enable Twilio SMS service (default)

use cc_core::errors::StoreError;

/// Cache module - Redis client and passcode store
pub mod cache;

/// SMS service module - External SMS providers
pub mod sms;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Stored value could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<InfrastructureError> for StoreError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Serialization(e) => StoreError::Serialization(e.to_string()),
            other => StoreError::Backend(other.to_string()),
        }
    }
}
