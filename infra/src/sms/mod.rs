//! SMS Service Module
//!
//! SMS providers for delivering verification codes:
//!
//! - **SMS Service Trait**: Common interface for all SMS providers
//! - **Mock Implementation**: Console output for development
//! - **Twilio Support**: Production SMS via Twilio API
//! - **Adapter**: Exposes a provider to the passcode service

pub mod adapter;
pub mod mock_sms;
pub mod sms_service;

// Twilio SMS service (feature-gated)
#[cfg(feature = "twilio-sms")]
pub mod twilio;

pub use adapter::SmsServiceAdapter;
pub use mock_sms::MockSmsService;
pub use sms_service::{is_deliverable_phone_number, verification_message, SmsService};

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsService};

use cc_shared::config::{SmsConfig, SmsProvider};

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create an SMS service based on configuration
///
/// A misconfigured real provider is an error rather than a silent fall back
/// to the mock, which would print codes to the console.
pub fn create_sms_service(config: &SmsConfig) -> Result<Box<dyn SmsService>, InfrastructureError> {
    match config.provider {
        SmsProvider::Mock => {
            tracing::warn!("Using mock SMS service; verification codes are printed to stdout");
            Ok(Box::new(MockSmsService::new()))
        }
        #[cfg(feature = "twilio-sms")]
        SmsProvider::Twilio => {
            let twilio_config = TwilioConfig::from_sms_config(config)?;
            Ok(Box::new(TwilioSmsService::new(twilio_config)))
        }
        #[cfg(not(feature = "twilio-sms"))]
        SmsProvider::Twilio => Err(InfrastructureError::Config(
            "SMS_PROVIDER=twilio requires the twilio-sms feature".to_string(),
        )),
    }
}
