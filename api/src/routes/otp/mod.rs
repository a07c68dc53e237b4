//! Passcode route handlers
//!
//! - `POST /api/v1/otp/send` (alias `POST /api/send-otp`)
//! - `POST /api/v1/otp/verify` (alias `POST /api/verify-otp`)

pub mod send_code;
pub mod verify_code;

pub use send_code::{send_code, SEND_SUCCESS_MESSAGE};
pub use verify_code::verify_code;
