//! Configuration for the passcode service

use cc_shared::config::{CooldownPolicy, OtpConfig, PhoneFormat};

use crate::domain::entities::{DEFAULT_EXPIRATION_SECONDS, MAX_ATTEMPTS};
use crate::errors::{DomainError, DomainResult};

/// Upper bound for passcode lifetime and resend cooldown (one day)
pub const MAX_WINDOW_SECONDS: i64 = 86_400;

/// Configuration for the passcode service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Seconds before a passcode expires
    pub code_expiration_seconds: i64,
    /// Failed attempts allowed per passcode
    pub max_attempts: u32,
    /// Accepted phone number shape
    pub phone_format: PhoneFormat,
    /// Behaviour when a live passcode already exists at issuance
    pub cooldown_policy: CooldownPolicy,
    /// Minimum seconds between issuances when the policy rejects
    pub resend_cooldown_seconds: i64,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_seconds: DEFAULT_EXPIRATION_SECONDS,
            max_attempts: MAX_ATTEMPTS,
            phone_format: PhoneFormat::Digits,
            cooldown_policy: CooldownPolicy::Warn,
            resend_cooldown_seconds: 60,
        }
    }
}

impl OtpServiceConfig {
    /// Reject settings that would make every passcode unusable
    pub fn validate(&self) -> DomainResult<()> {
        if !(1..=MAX_WINDOW_SECONDS).contains(&self.code_expiration_seconds) {
            return Err(DomainError::Validation {
                message: format!(
                    "code_expiration_seconds must be between 1 and {}, got {}",
                    MAX_WINDOW_SECONDS, self.code_expiration_seconds
                ),
            });
        }
        if self.max_attempts == 0 {
            return Err(DomainError::Validation {
                message: "max_attempts must be at least 1".to_string(),
            });
        }
        if !(0..=MAX_WINDOW_SECONDS).contains(&self.resend_cooldown_seconds) {
            return Err(DomainError::Validation {
                message: format!(
                    "resend_cooldown_seconds must be between 0 and {}, got {}",
                    MAX_WINDOW_SECONDS, self.resend_cooldown_seconds
                ),
            });
        }
        Ok(())
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_expiration_seconds: config.expiry_seconds,
            max_attempts: config.max_attempts,
            phone_format: config.phone_format,
            cooldown_policy: config.cooldown_policy,
            resend_cooldown_seconds: config.resend_cooldown_seconds,
        }
    }
}
