pub mod otp;
pub mod session;

pub use otp::{SendOtpRequest, VerifyOtpRequest};
pub use session::SessionRouteQuery;
