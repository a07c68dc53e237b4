//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    Clock, CodeGenerator, InMemoryPasscodeStore, OtpService, OtpServiceConfig, PasscodeStore,
    RandomCodeGenerator, SendCodeResult, SmsServiceTrait, SystemClock, VerifyCodeResult,
    VerifyStatus,
};
