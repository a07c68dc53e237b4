//! SMS Service Interface
//!
//! Defines the trait for SMS providers that deliver verification codes.

use async_trait::async_trait;

use cc_shared::phone::{is_valid_digits_phone, is_valid_e164_phone};

use crate::InfrastructureError;

/// SMS service trait for sending text messages
///
/// Implementations include:
/// - Twilio SMS API
/// - Mock implementation for development
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send an SMS message to a phone number
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Send a verification code via SMS using the standard message text
    async fn send_verification_code(
        &self,
        phone_number: &str,
        code: &str,
    ) -> Result<String, InfrastructureError> {
        self.send_sms(phone_number, &verification_message(code)).await
    }

    /// Name of the SMS service provider (e.g., "Twilio", "Mock")
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    async fn is_available(&self) -> bool {
        true
    }
}

/// Body of the verification SMS
pub fn verification_message(code: &str) -> String {
    format!(
        "Your Civic Connect verification code is: {}. Do not share this code with anyone.",
        code
    )
}

/// Whether `phone` is deliverable in either accepted shape (bare digits or E.164)
pub fn is_deliverable_phone_number(phone: &str) -> bool {
    is_valid_digits_phone(phone) || is_valid_e164_phone(phone)
}
