//! Error types for passcode issuance, verification and storage
//!
//! Verification outcomes such as a wrong or expired code are returned as
//! values, not errors. These types cover requests that never reach the state
//! machine and failures of the collaborators behind it.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid phone format: {phone}")]
    InvalidPhoneFormat { phone: String },

    #[error("Invalid verification code format")]
    InvalidCodeFormat,

    #[error("Rate limit exceeded: retry after {retry_after_seconds} seconds")]
    RateLimitExceeded { retry_after_seconds: u64 },

    #[error("SMS service failure")]
    SmsServiceFailure,
}

/// Passcode store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Store serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;

    #[test]
    fn test_domain_error_wraps_transparently() {
        let error: DomainError = AuthError::InvalidCodeFormat.into();
        assert_eq!(error.to_string(), "Invalid verification code format");

        let error: DomainError = StoreError::Backend("connection reset".to_string()).into();
        assert_eq!(error.to_string(), "Store backend error: connection reset");
    }
}
