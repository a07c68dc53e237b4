//! One-time passcode service module for phone verification
//!
//! This module provides the complete passcode workflow:
//! - 6-digit code generation
//! - Issuance with optional resend cooldown
//! - Verification with expiry and attempt tracking
//! - Store and SMS delivery seams for infrastructure implementations

mod clock;
mod config;
mod generator;
mod locks;
mod service;
mod store;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{OtpServiceConfig, MAX_WINDOW_SECONDS};
pub use generator::{generate_code, CodeGenerator, FixedCodeGenerator, RandomCodeGenerator};
pub use service::OtpService;
pub use store::InMemoryPasscodeStore;
pub use traits::{PasscodeStore, SmsServiceTrait};
pub use types::{SendCodeResult, VerifyCodeResult, VerifyStatus};
