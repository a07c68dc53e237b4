//! Passcode record entity for phone-number verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};

/// Maximum number of failed verification attempts allowed
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the passcode
pub const CODE_LENGTH: usize = 6;

/// Smallest passcode value (no leading zero)
pub const CODE_MIN: u32 = 100_000;

/// Largest passcode value
pub const CODE_MAX: u32 = 999_999;

/// Default lifetime of a passcode (5 minutes)
pub const DEFAULT_EXPIRATION_SECONDS: i64 = 300;

/// The live passcode for one phone number
///
/// At most one record exists per phone number. Issuance replaces it,
/// verification mutates only `attempts`, and success, observed expiry or
/// attempt exhaustion delete it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasscodeRecord {
    /// The 6-digit passcode
    pub code: String,

    /// When the passcode was issued
    pub issued_at: DateTime<Utc>,

    /// Instant after which the passcode is invalid
    pub expires_at: DateTime<Utc>,

    /// Failed verification attempts since issuance
    pub attempts: u32,
}

impl PasscodeRecord {
    /// Creates a fresh record issued at `now` and valid for `lifetime_seconds`
    pub fn issue(code: impl Into<String>, now: DateTime<Utc>, lifetime_seconds: i64) -> Self {
        Self {
            code: code.into(),
            issued_at: now,
            expires_at: now + Duration::seconds(lifetime_seconds),
            attempts: 0,
        }
    }

    /// Strictly after `expires_at`; the boundary instant itself is still valid
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Whether the attempt budget is used up
    pub fn is_exhausted(&self, max_attempts: u32) -> bool {
        self.attempts >= max_attempts
    }

    /// Compares `candidate` against the stored code in constant time
    pub fn matches(&self, candidate: &str) -> bool {
        self.code.len() == candidate.len()
            && constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }

    /// Counts one failed attempt and returns the attempts left under `max_attempts`
    pub fn record_failed_attempt(&mut self, max_attempts: u32) -> u32 {
        self.attempts = (self.attempts + 1).min(max_attempts);
        self.remaining_attempts(max_attempts)
    }

    /// Attempts left before the record is discarded
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }

    /// Seconds until expiry at `now`, zero once expired
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }

    /// Seconds since issuance at `now`
    pub fn age_seconds(&self, now: DateTime<Utc>) -> i64 {
        (now - self.issued_at).num_seconds()
    }
}
