//! Mapping of domain errors to HTTP responses
//!
//! Every error body is a `MessageResponse` with `success: false`. Failures
//! of the store or the SMS provider are reported with a generic message; the
//! detail only goes to the log.

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::header,
    web, HttpRequest, HttpResponse,
};

use cc_core::errors::{AuthError, DomainError};
use cc_shared::MessageResponse;

pub const INVALID_PHONE_MESSAGE: &str = "Invalid phone number format.";
pub const INVALID_OTP_FORMAT_MESSAGE: &str = "Invalid OTP format. Must be 6 digits.";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body.";
pub const INVALID_SESSION_QUERY_MESSAGE: &str = "Invalid session route query.";

/// Endpoint an error came from; selects the generic failure message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpOperation {
    Send,
    Verify,
}

impl OtpOperation {
    fn failure_message(self) -> &'static str {
        match self {
            OtpOperation::Send => "Failed to send OTP. Please try again later.",
            OtpOperation::Verify => "Failed to verify OTP. Please try again later.",
        }
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError, operation: OtpOperation) -> HttpResponse {
    match error {
        DomainError::Auth(AuthError::InvalidPhoneFormat { phone }) => {
            log::warn!("Rejected request with invalid phone number: {}", phone);
            HttpResponse::BadRequest().json(MessageResponse::failure(INVALID_PHONE_MESSAGE))
        }
        DomainError::Auth(AuthError::InvalidCodeFormat) => {
            HttpResponse::BadRequest().json(MessageResponse::failure(INVALID_OTP_FORMAT_MESSAGE))
        }
        DomainError::Auth(AuthError::RateLimitExceeded {
            retry_after_seconds,
        }) => HttpResponse::TooManyRequests()
            .insert_header((header::RETRY_AFTER, retry_after_seconds.to_string()))
            .json(MessageResponse::failure(format!(
                "Please wait {} seconds before requesting a new OTP.",
                retry_after_seconds
            ))),
        error @ (DomainError::Auth(AuthError::SmsServiceFailure)
        | DomainError::Store(_)
        | DomainError::Validation { .. }
        | DomainError::Internal { .. }) => {
            log::error!("{:?} failed: {}", operation, error);
            HttpResponse::InternalServerError()
                .json(MessageResponse::failure(operation.failure_message()))
        }
    }
}

/// JSON extractor configuration answering malformed bodies with a 400 envelope
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected malformed JSON body on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(MessageResponse::failure(INVALID_BODY_MESSAGE));
    InternalError::from_response(err, response).into()
}

/// Default 404 handler
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(MessageResponse::failure(
        "The requested resource was not found.",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use cc_core::errors::StoreError;

    #[test]
    fn test_format_errors_are_bad_requests() {
        let response = handle_domain_error(
            AuthError::InvalidPhoneFormat {
                phone: "123****".to_string(),
            }
            .into(),
            OtpOperation::Send,
        );
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = handle_domain_error(AuthError::InvalidCodeFormat.into(), OtpOperation::Verify);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_rate_limit_sets_retry_after() {
        let response = handle_domain_error(
            AuthError::RateLimitExceeded {
                retry_after_seconds: 42,
            }
            .into(),
            OtpOperation::Send,
        );
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(header::RETRY_AFTER).unwrap(),
            "42"
        );
    }

    #[test]
    fn test_collaborator_failures_are_server_errors() {
        let response = handle_domain_error(AuthError::SmsServiceFailure.into(), OtpOperation::Send);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_domain_error(
            StoreError::Backend("connection refused".to_string()).into(),
            OtpOperation::Verify,
        );
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
