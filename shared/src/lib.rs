//! Shared utilities and common types for the Civic Connect server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Phone number utilities
//! - Response envelopes

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, CooldownPolicy, CorsConfig, Environment, OtpConfig, PhoneFormat,
    ServerConfig, SmsConfig, SmsProvider, StoreBackend,
};
pub use types::{HealthResponse, MessageResponse};
pub use utils::phone;
