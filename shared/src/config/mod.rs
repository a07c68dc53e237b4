//! Configuration module with business-specific sub-modules
//!
//! - `cache` - Redis connection and passcode store backend selection
//! - `environment` - Environment detection
//! - `otp` - Passcode lifetime, attempt limits and phone format
//! - `server` - HTTP server and CORS configuration
//! - `sms` - SMS delivery provider settings

pub mod cache;
pub mod environment;
pub mod otp;
pub mod server;
pub mod sms;

use serde::{Deserialize, Serialize};

pub use cache::{CacheConfig, StoreBackend};
pub use environment::Environment;
pub use otp::{CooldownPolicy, OtpConfig, PhoneFormat};
pub use server::{CorsConfig, ServerConfig};
pub use sms::{SmsConfig, SmsProvider};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Redis configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Which passcode store backs the OTP service
    #[serde(default)]
    pub store: StoreBackend,

    /// Passcode lifecycle configuration
    #[serde(default)]
    pub otp: OtpConfig,

    /// SMS delivery configuration
    #[serde(default)]
    pub sms: SmsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            cors: CorsConfig::from_env(),
            cache: CacheConfig::from_env(),
            store: StoreBackend::from_env(),
            otp: OtpConfig::from_env(),
            sms: SmsConfig::from_env(),
        }
    }

    /// Load configuration layered from `config/<environment>.toml` (optional)
    /// and `CC__`-prefixed environment variables, e.g. `CC__OTP__MAX_ATTEMPTS=5`.
    ///
    /// Falls back to [`AppConfig::from_env`] when no file is present and no
    /// prefixed variables are set.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let environment = Environment::from_env();
        let defaults = Self::from_env();

        let settings = ::config::Config::builder()
            .add_source(::config::Config::try_from(&defaults)?)
            .add_source(
                ::config::File::with_name(&format!("config/{}", environment)).required(false),
            )
            .add_source(
                ::config::Environment::with_prefix("CC")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.otp.expiry_seconds, 300);
        assert_eq!(config.otp.max_attempts, 3);
        assert_eq!(config.sms.provider, SmsProvider::Mock);
    }

    #[test]
    fn test_app_config_serde_round_trip_keeps_otp_settings() {
        let mut config = AppConfig::default();
        config.otp.phone_format = PhoneFormat::E164;
        config.otp.cooldown_policy = CooldownPolicy::Reject;

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.otp.phone_format, PhoneFormat::E164);
        assert_eq!(parsed.otp.cooldown_policy, CooldownPolicy::Reject);
    }

    #[test]
    fn test_app_config_deserializes_partial_document() {
        let parsed: AppConfig =
            serde_json::from_str(r#"{ "otp": { "max_attempts": 5 } }"#).unwrap();
        assert_eq!(parsed.otp.max_attempts, 5);
        assert_eq!(parsed.otp.expiry_seconds, 300);
        assert_eq!(parsed.server.port, 8080);
    }
}
