//! Twilio SMS Service Implementation
//!
//! Production SMS delivery through the Twilio API. Numbers without a country
//! code are completed with the configured default before being validated
//! with the `phonenumber` crate. Sending is attempted once; a failure is
//! reported to the caller, which asks the user to try again.

use async_trait::async_trait;
use phonenumber::{Mode, PhoneNumber};
use tracing::{debug, error, info};
use twilio::{Client, OutboundMessage};

use cc_shared::config::SmsConfig;
use cc_shared::phone::{mask_phone_number, to_e164};

use crate::{sms::sms_service::SmsService, InfrastructureError};

/// Twilio message body limit
const MAX_MESSAGE_LENGTH: usize = 1600;

/// Twilio SMS service configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// Country code applied to numbers given without one (e.g. "+1")
    pub default_country_code: String,
}

impl TwilioConfig {
    /// Build from the shared SMS configuration, checking required credentials
    pub fn from_sms_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        if config.account_sid.is_empty() {
            return Err(InfrastructureError::Config(
                "TWILIO_ACCOUNT_SID not set".to_string(),
            ));
        }
        if config.auth_token.is_empty() {
            return Err(InfrastructureError::Config(
                "TWILIO_AUTH_TOKEN not set".to_string(),
            ));
        }
        if !config.from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
            default_country_code: config.default_country_code.clone(),
        })
    }
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: Client,
    config: TwilioConfig,
}

impl TwilioSmsService {
    /// Create a new Twilio SMS service
    pub fn new(config: TwilioConfig) -> Self {
        let client = Client::new(&config.account_sid, &config.auth_token);

        info!(
            "Twilio SMS service initialized with from number: {}",
            mask_phone_number(&config.from_number)
        );

        Self { client, config }
    }

    /// Validate and normalize a phone number to E.164 format
    pub(crate) fn normalize_recipient(&self, phone: &str) -> Result<String, InfrastructureError> {
        let candidate = to_e164(phone, &self.config.default_country_code).ok_or_else(|| {
            InfrastructureError::Sms(format!(
                "Phone number cannot be expressed in E.164 format: {}",
                mask_phone_number(phone)
            ))
        })?;

        match candidate.parse::<PhoneNumber>() {
            Ok(parsed) => {
                let formatted = parsed.format().mode(Mode::E164).to_string();
                debug!("Validated phone number: {}", mask_phone_number(&formatted));
                Ok(formatted)
            }
            Err(e) => {
                error!("Invalid phone number format: {}", e);
                Err(InfrastructureError::Sms(format!(
                    "Invalid phone number format: {}",
                    e
                )))
            }
        }
    }
}

#[async_trait]
impl SmsService for TwilioSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        if message.len() > MAX_MESSAGE_LENGTH {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        let to = self.normalize_recipient(phone_number)?;
        let masked = mask_phone_number(&to);

        let msg = OutboundMessage::new(&self.config.from_number, &to, message);
        match self.client.send_message(msg).await {
            Ok(response) => {
                info!("SMS sent successfully to {} with SID: {}", masked, response.sid);
                Ok(response.sid)
            }
            Err(e) => {
                error!("Failed to send SMS to {}: {}", masked, e);
                Err(InfrastructureError::Sms(format!("Twilio request failed: {}", e)))
            }
        }
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}
