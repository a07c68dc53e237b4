//! API response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `{ "success": bool, "message": string }` envelope used by the OTP endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Whether the operation succeeded
    pub success: bool,

    /// Human-readable outcome
    pub message: String,
}

impl MessageResponse {
    /// Create a successful response
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Create a failure response
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status
    pub status: String,

    /// Service name
    pub service: String,

    /// Service version
    pub version: String,

    /// Passcode store backend in use
    pub store: String,

    /// Check timestamp
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    /// Create a healthy response
    pub fn healthy(service: impl Into<String>, version: impl Into<String>, store: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            service: service.into(),
            version: version.into(),
            store: store.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a degraded response
    pub fn degraded(service: impl Into<String>, version: impl Into<String>, store: impl Into<String>) -> Self {
        Self {
            status: "degraded".to_string(),
            ..Self::healthy(service, version, store)
        }
    }
}
