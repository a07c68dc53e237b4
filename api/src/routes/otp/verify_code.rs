use actix_web::{web, HttpResponse};

use cc_core::services::{PasscodeStore, SmsServiceTrait};
use cc_shared::phone::mask_phone_number;
use cc_shared::MessageResponse;

use crate::app::AppState;
use crate::dto::VerifyOtpRequest;
use crate::handlers::{handle_domain_error, OtpOperation};

/// Handler for POST /api/v1/otp/verify
///
/// # Request Body
///
/// ```json
/// { "phoneNumber": "9876543210", "otp": "483920" }
/// ```
///
/// A failed verification (wrong, expired or exhausted code) is a 400 with
/// the reason in `message`. Store failures are a 500.
pub async fn verify_code<S, P>(
    state: web::Data<AppState<S, P>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    S: SmsServiceTrait + 'static,
    P: PasscodeStore + 'static,
{
    let VerifyOtpRequest { phone_number, otp } = request.into_inner();

    match state.otp_service.verify_code(&phone_number, &otp).await {
        Ok(result) if result.success => {
            log::info!(
                "Phone number verified: {}",
                mask_phone_number(&phone_number)
            );
            HttpResponse::Ok().json(MessageResponse::success(result.message))
        }
        Ok(result) => {
            log::info!(
                "Verification rejected for phone: {} ({:?})",
                mask_phone_number(&phone_number),
                result.status
            );
            HttpResponse::BadRequest().json(MessageResponse::failure(result.message))
        }
        Err(error) => handle_domain_error(error, OtpOperation::Verify),
    }
}
