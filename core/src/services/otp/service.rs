//! Passcode issuance and verification service

use chrono::Duration;
use std::sync::Arc;

use cc_shared::config::CooldownPolicy;
use cc_shared::phone::mask_phone_number;

use crate::domain::entities::{PasscodeRecord, CODE_LENGTH};
use crate::errors::{AuthError, DomainResult};

use super::clock::{Clock, SystemClock};
use super::config::OtpServiceConfig;
use super::generator::{CodeGenerator, RandomCodeGenerator};
use super::locks::PhoneLocks;
use super::traits::{PasscodeStore, SmsServiceTrait};
use super::types::{SendCodeResult, VerifyCodeResult, VerifyStatus};

/// Passcode service for phone-number verification
///
/// Every read-modify-write of a record happens under that phone number's
/// lock, so concurrent handlers in one process never lose an `attempts`
/// update, while requests for different numbers proceed in parallel. The
/// locks do not span processes; a shared Redis store accessed by several
/// processes can still interleave two verifications of the same number.
pub struct OtpService<S: SmsServiceTrait, P: PasscodeStore> {
    /// SMS service for delivering codes
    sms_service: Arc<S>,
    /// Store holding live passcodes
    store: Arc<P>,
    /// Service configuration
    config: OtpServiceConfig,
    /// Source of new codes
    generator: Arc<dyn CodeGenerator>,
    /// Source of the current time
    clock: Arc<dyn Clock>,
    /// Per-phone locks guarding record updates
    record_locks: PhoneLocks,
}

impl<S: SmsServiceTrait, P: PasscodeStore> OtpService<S, P> {
    /// Create a new passcode service using the OS random source and wall clock
    ///
    /// # Arguments
    ///
    /// * `sms_service` - SMS delivery implementation
    /// * `store` - Passcode store implementation
    /// * `config` - Service configuration
    pub fn new(sms_service: Arc<S>, store: Arc<P>, config: OtpServiceConfig) -> Self {
        Self {
            sms_service,
            store,
            config,
            generator: Arc::new(RandomCodeGenerator),
            clock: Arc::new(SystemClock),
            record_locks: PhoneLocks::new(),
        }
    }

    /// Replace the code generator
    pub fn with_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Replace the clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<P> {
        &self.store
    }

    /// Issue a passcode for a phone number
    ///
    /// This method:
    /// 1. Validates the service configuration and the phone number format
    /// 2. Applies the cooldown policy to any live passcode
    /// 3. Generates and stores a new passcode, replacing the old one
    /// 4. Hands the code to the SMS service
    ///
    /// If delivery fails the stored passcode is withdrawn again, since the
    /// user never received it. Delivery is not retried.
    pub async fn request_code(&self, phone: &str) -> DomainResult<SendCodeResult> {
        self.config.validate()?;
        self.validate_phone(phone)?;
        let masked = mask_phone_number(phone);

        let record = {
            let _guard = self.record_locks.acquire(phone).await;
            let now = self.clock.now();

            if let Some(existing) = self.store.get(phone).await? {
                if !existing.is_expired_at(now) {
                    self.apply_cooldown(&masked, &existing, now)?;
                }
            }

            let record = PasscodeRecord::issue(
                self.generator.generate(),
                now,
                self.config.code_expiration_seconds,
            );
            self.store.put(phone, record.clone()).await?;
            record
        };

        tracing::info!(
            phone = %masked,
            event = "otp_issued",
            expires_at = %record.expires_at,
            "Issued new passcode"
        );

        match self
            .sms_service
            .send_verification_code(phone, &record.code)
            .await
        {
            Ok(message_id) => {
                tracing::info!(
                    phone = %masked,
                    event = "otp_delivered",
                    message_id = %message_id,
                    "Passcode handed to SMS service"
                );
                Ok(SendCodeResult {
                    message_id,
                    expires_at: record.expires_at,
                    resend_available_at: record.issued_at
                        + Duration::seconds(self.config.resend_cooldown_seconds),
                })
            }
            Err(e) => {
                tracing::error!(
                    phone = %masked,
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to deliver passcode"
                );
                self.withdraw(phone, &record).await;
                Err(AuthError::SmsServiceFailure.into())
            }
        }
    }

    /// Verify a submitted code for a phone number
    ///
    /// Format errors are returned as `Err` without touching the store. Every
    /// other outcome is an `Ok(VerifyCodeResult)`:
    ///
    /// 1. no record: `NoCode`
    /// 2. record past expiry: removed, `Expired`
    /// 3. attempt budget spent: removed, `TooManyAttempts`
    /// 4. code matches: removed, `Verified`
    /// 5. mismatch: attempts incremented, `InvalidCode`
    pub async fn verify_code(&self, phone: &str, code: &str) -> DomainResult<VerifyCodeResult> {
        self.validate_phone(phone)?;
        if !is_well_formed_code(code) {
            tracing::warn!(
                phone = %mask_phone_number(phone),
                event = "invalid_code_format",
                code_length = code.len(),
                "Invalid verification code format provided"
            );
            return Err(AuthError::InvalidCodeFormat.into());
        }

        let masked = mask_phone_number(phone);
        let _guard = self.record_locks.acquire(phone).await;
        let now = self.clock.now();

        let Some(mut record) = self.store.get(phone).await? else {
            tracing::info!(phone = %masked, event = "otp_not_found", "No passcode on record");
            return Ok(VerifyStatus::NoCode.into());
        };

        if record.is_expired_at(now) {
            self.store.remove(phone).await?;
            tracing::info!(phone = %masked, event = "otp_expired", "Passcode expired");
            return Ok(VerifyStatus::Expired.into());
        }

        if record.is_exhausted(self.config.max_attempts) {
            self.store.remove(phone).await?;
            tracing::warn!(
                phone = %masked,
                event = "max_attempts_exceeded",
                "Maximum verification attempts exceeded for phone number"
            );
            return Ok(VerifyStatus::TooManyAttempts.into());
        }

        if record.matches(code) {
            self.store.remove(phone).await?;
            tracing::info!(
                phone = %masked,
                event = "otp_verified_success",
                "Verification code successfully verified"
            );
            return Ok(VerifyStatus::Verified.into());
        }

        let remaining_attempts = record.record_failed_attempt(self.config.max_attempts);
        self.store.put(phone, record).await?;
        tracing::warn!(
            phone = %masked,
            event = "otp_verification_failed",
            remaining_attempts = remaining_attempts,
            "Verification code mismatch"
        );

        Ok(VerifyStatus::InvalidCode { remaining_attempts }.into())
    }

    /// Check the passcode store backend
    pub async fn store_health(&self) -> DomainResult<()> {
        self.store.health_check().await?;
        Ok(())
    }

    fn validate_phone(&self, phone: &str) -> DomainResult<()> {
        if self.config.phone_format.matches(phone) {
            Ok(())
        } else {
            tracing::warn!(
                phone = %mask_phone_number(phone),
                event = "invalid_phone_format",
                format = ?self.config.phone_format,
                "Rejected phone number with invalid format"
            );
            Err(AuthError::InvalidPhoneFormat {
                phone: mask_phone_number(phone),
            }
            .into())
        }
    }

    fn apply_cooldown(
        &self,
        masked: &str,
        existing: &PasscodeRecord,
        now: chrono::DateTime<chrono::Utc>,
    ) -> DomainResult<()> {
        let cooldown_remaining = self.config.resend_cooldown_seconds - existing.age_seconds(now);

        match self.config.cooldown_policy {
            CooldownPolicy::Warn => {
                tracing::warn!(
                    phone = %masked,
                    event = "otp_reissued_while_live",
                    cooldown_remaining = cooldown_remaining.max(0),
                    "Passcode requested while a previous one is still live; replacing it"
                );
                Ok(())
            }
            CooldownPolicy::Reject if cooldown_remaining > 0 => {
                tracing::warn!(
                    phone = %masked,
                    event = "rate_limit_exceeded",
                    cooldown_remaining = cooldown_remaining,
                    "Verification code request rate limit exceeded"
                );
                Err(AuthError::RateLimitExceeded {
                    retry_after_seconds: cooldown_remaining as u64,
                }
                .into())
            }
            CooldownPolicy::Reject => Ok(()),
        }
    }

    // Remove `issued` unless a newer issuance already replaced it
    async fn withdraw(&self, phone: &str, issued: &PasscodeRecord) {
        let _guard = self.record_locks.acquire(phone).await;
        match self.store.get(phone).await {
            Ok(Some(current)) if current == *issued => {
                if let Err(e) = self.store.remove(phone).await {
                    tracing::warn!(
                        phone = %mask_phone_number(phone),
                        error = %e,
                        "Failed to withdraw undelivered passcode"
                    );
                }
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(
                    phone = %mask_phone_number(phone),
                    error = %e,
                    "Failed to read passcode while withdrawing it"
                );
            }
        }
    }
}

/// Exactly `CODE_LENGTH` ASCII digits
fn is_well_formed_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}
