//! Traits for passcode storage and SMS delivery integration

use async_trait::async_trait;

use crate::domain::entities::PasscodeRecord;
use crate::errors::StoreError;

/// Trait for SMS delivery integration
#[async_trait]
pub trait SmsServiceTrait: Send + Sync {
    /// Deliver a passcode to a phone number, returning the provider message ID
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String>;
}

/// Keyed store of live passcode records, one per phone number
#[async_trait]
pub trait PasscodeStore: Send + Sync {
    /// Store `record` for `phone`, replacing any existing record
    async fn put(&self, phone: &str, record: PasscodeRecord) -> Result<(), StoreError>;

    /// Fetch the record for `phone`
    async fn get(&self, phone: &str) -> Result<Option<PasscodeRecord>, StoreError>;

    /// Delete the record for `phone`; removing a missing record is not an error
    async fn remove(&self, phone: &str) -> Result<(), StoreError>;

    /// Short backend name for health reporting
    fn backend_name(&self) -> &'static str;

    /// Check that the backend is reachable
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
