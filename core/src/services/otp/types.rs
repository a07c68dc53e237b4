//! Types for passcode service results

use chrono::{DateTime, Utc};

/// Result of issuing a passcode
///
/// Carries no code. The passcode only leaves the service
/// through the SMS collaborator.
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// The SMS message ID from the provider
    pub message_id: String,
    /// When the issued passcode expires
    pub expires_at: DateTime<Utc>,
    /// Earliest time a new passcode may be requested under a rejecting cooldown
    pub resend_available_at: DateTime<Utc>,
}

/// Outcome of one verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyStatus {
    /// Code matched; the passcode is consumed
    Verified,
    /// No passcode on record for the number
    NoCode,
    /// Passcode found past its expiry; it has been discarded
    Expired,
    /// Attempt budget used up; the passcode has been discarded
    TooManyAttempts,
    /// Code did not match; the passcode remains for another try
    InvalidCode { remaining_attempts: u32 },
}

impl VerifyStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, VerifyStatus::Verified)
    }

    /// Whether the passcode record was deleted by this attempt (or never existed)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, VerifyStatus::InvalidCode { .. })
    }

    /// User-facing explanation
    pub fn message(&self) -> String {
        match self {
            VerifyStatus::Verified => "OTP verified successfully.".to_string(),
            VerifyStatus::NoCode => {
                "No OTP found for this number or it has expired. Please request a new one."
                    .to_string()
            }
            VerifyStatus::Expired => "OTP has expired. Please request a new one.".to_string(),
            VerifyStatus::TooManyAttempts => {
                "Too many incorrect OTP attempts. Please request a new one.".to_string()
            }
            VerifyStatus::InvalidCode { remaining_attempts } => {
                format!("Invalid OTP. {} attempts remaining.", remaining_attempts)
            }
        }
    }
}

/// Result of verifying a code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCodeResult {
    /// Whether the verification was successful
    pub success: bool,
    /// Which state-machine branch produced the result
    pub status: VerifyStatus,
    /// Human-readable reason, present for success and failure alike
    pub message: String,
}

impl From<VerifyStatus> for VerifyCodeResult {
    fn from(status: VerifyStatus) -> Self {
        Self {
            success: status.is_success(),
            status,
            message: status.message(),
        }
    }
}
