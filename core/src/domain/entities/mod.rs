//! Domain entities representing core business objects.

pub mod passcode;


pub use passcode::{
    PasscodeRecord, CODE_LENGTH, CODE_MAX, CODE_MIN, DEFAULT_EXPIRATION_SECONDS, MAX_ATTEMPTS,
};
