use actix_web::{web, HttpResponse};

use cc_core::services::{PasscodeStore, SmsServiceTrait};
use cc_shared::phone::mask_phone_number;
use cc_shared::MessageResponse;

use crate::app::AppState;
use crate::dto::SendOtpRequest;
use crate::handlers::{handle_domain_error, OtpOperation};

/// Success text; the code itself only travels by SMS
pub const SEND_SUCCESS_MESSAGE: &str = "OTP has been \"sent\" to your phone (simulated).";

/// Handler for POST /api/v1/otp/send
///
/// # Request Body
///
/// ```json
/// { "phoneNumber": "9876543210" }
/// ```
///
/// # Response
///
/// - 200 `{ "success": true, "message": "..." }`
/// - 400 invalid phone number format
/// - 429 a passcode was issued too recently (rejecting cooldown only)
/// - 500 SMS or store failure
pub async fn send_code<S, P>(
    state: web::Data<AppState<S, P>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    S: SmsServiceTrait + 'static,
    P: PasscodeStore + 'static,
{
    let phone = request.into_inner().phone_number;

    log::info!(
        "Processing send OTP request for phone: {}",
        mask_phone_number(&phone)
    );

    match state.otp_service.request_code(&phone).await {
        Ok(result) => {
            log::info!(
                "OTP issued for phone: {}, message_id: {}, expires_at: {}",
                mask_phone_number(&phone),
                result.message_id,
                result.expires_at
            );
            HttpResponse::Ok().json(MessageResponse::success(SEND_SUCCESS_MESSAGE))
        }
        Err(error) => handle_domain_error(error, OtpOperation::Send),
    }
}
