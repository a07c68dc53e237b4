//! SMS delivery configuration

use serde::{Deserialize, Serialize};
use std::env;

/// SMS gateway used to deliver passcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// Logs messages instead of sending them. Development only.
    #[default]
    Mock,
    /// Twilio Programmable Messaging
    Twilio,
}

impl std::str::FromStr for SmsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(SmsProvider::Mock),
            "twilio" => Ok(SmsProvider::Twilio),
            _ => Err(format!("Invalid SMS provider: {}", s)),
        }
    }
}

/// SMS service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Provider to deliver through
    #[serde(default)]
    pub provider: SmsProvider,

    /// Twilio account SID
    #[serde(default)]
    pub account_sid: String,

    /// Twilio auth token
    #[serde(default)]
    pub auth_token: String,

    /// Sender number in E.164 format
    #[serde(default)]
    pub from_number: String,

    /// Country code prepended to bare-digit numbers before delivery
    #[serde(default = "default_country_code")]
    pub default_country_code: String,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: SmsProvider::default(),
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            default_country_code: default_country_code(),
        }
    }
}

impl SmsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            provider: env::var("SMS_PROVIDER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            account_sid: env::var("TWILIO_ACCOUNT_SID").unwrap_or_default(),
            auth_token: env::var("TWILIO_AUTH_TOKEN").unwrap_or_default(),
            from_number: env::var("TWILIO_FROM_NUMBER").unwrap_or_default(),
            default_country_code: env::var("SMS_DEFAULT_COUNTRY_CODE")
                .unwrap_or_else(|_| default_country_code()),
        }
    }
}

fn default_country_code() -> String {
    String::from("+1")
}
