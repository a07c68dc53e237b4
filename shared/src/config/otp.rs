//! One-time passcode configuration

use serde::{Deserialize, Serialize};
use std::env;

use crate::utils::phone;

/// Accepted shape of the phone number identifying a passcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneFormat {
    /// 10 to 15 bare digits, e.g. `9876543210`
    #[default]
    Digits,
    /// E.164 with a leading `+`, e.g. `+919876543210`
    E164,
}

impl PhoneFormat {
    /// Check whether `phone` matches this format exactly (no normalization)
    pub fn matches(&self, phone: &str) -> bool {
        match self {
            PhoneFormat::Digits => phone::is_valid_digits_phone(phone),
            PhoneFormat::E164 => phone::is_valid_e164_phone(phone),
        }
    }
}

impl std::str::FromStr for PhoneFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "digits" | "simple" => Ok(PhoneFormat::Digits),
            "e164" | "e.164" => Ok(PhoneFormat::E164),
            _ => Err(format!("Invalid phone format: {}", s)),
        }
    }
}

/// What issuance does when a live passcode already exists for the number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CooldownPolicy {
    /// Log a warning and issue anyway, replacing the live passcode
    #[default]
    Warn,
    /// Refuse issuance until the resend cooldown has elapsed
    Reject,
}

impl std::str::FromStr for CooldownPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warn" | "permissive" => Ok(CooldownPolicy::Warn),
            "reject" | "enforce" => Ok(CooldownPolicy::Reject),
            _ => Err(format!("Invalid cooldown policy: {}", s)),
        }
    }
}

/// Passcode lifecycle settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Seconds a passcode stays valid after issuance
    #[serde(default = "default_expiry_seconds")]
    pub expiry_seconds: i64,

    /// Failed attempts allowed before the passcode is discarded
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Accepted phone number shape
    #[serde(default)]
    pub phone_format: PhoneFormat,

    /// Behaviour when re-issuing while a passcode is live
    #[serde(default)]
    pub cooldown_policy: CooldownPolicy,

    /// Minimum seconds between issuances under [`CooldownPolicy::Reject`]
    #[serde(default = "default_resend_cooldown_seconds")]
    pub resend_cooldown_seconds: i64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            expiry_seconds: default_expiry_seconds(),
            max_attempts: default_max_attempts(),
            phone_format: PhoneFormat::default(),
            cooldown_policy: CooldownPolicy::default(),
            resend_cooldown_seconds: default_resend_cooldown_seconds(),
        }
    }
}

impl OtpConfig {
    /// Create from `OTP_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            expiry_seconds: parse_env("OTP_EXPIRY_SECONDS").unwrap_or(defaults.expiry_seconds),
            max_attempts: parse_env("OTP_MAX_ATTEMPTS").unwrap_or(defaults.max_attempts),
            phone_format: parse_env("OTP_PHONE_FORMAT").unwrap_or(defaults.phone_format),
            cooldown_policy: parse_env("OTP_COOLDOWN_POLICY").unwrap_or(defaults.cooldown_policy),
            resend_cooldown_seconds: parse_env("OTP_RESEND_COOLDOWN_SECONDS")
                .unwrap_or(defaults.resend_cooldown_seconds),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

fn default_expiry_seconds() -> i64 {
    300
}

fn default_max_attempts() -> u32 {
    3
}

fn default_resend_cooldown_seconds() -> i64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_config_default() {
        let config = OtpConfig::default();
        assert_eq!(config.expiry_seconds, 300);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.phone_format, PhoneFormat::Digits);
        assert_eq!(config.cooldown_policy, CooldownPolicy::Warn);
    }

    #[test]
    fn test_phone_format_matches() {
        assert!(PhoneFormat::Digits.matches("9876543210"));
        assert!(!PhoneFormat::Digits.matches("+919876543210"));
        assert!(PhoneFormat::E164.matches("+919876543210"));
        assert!(!PhoneFormat::E164.matches("9876543210"));
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("reject".parse::<CooldownPolicy>().unwrap(), CooldownPolicy::Reject);
        assert_eq!("E164".parse::<PhoneFormat>().unwrap(), PhoneFormat::E164);
        assert!("sometimes".parse::<CooldownPolicy>().is_err());
    }
}
