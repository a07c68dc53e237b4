use actix_web::{web, HttpResponse};

use cc_core::services::{PasscodeStore, SmsServiceTrait};
use cc_shared::HealthResponse;

use crate::app::AppState;

const SERVICE_NAME: &str = "civic-connect-api";

/// Health check endpoint handler
///
/// Reports 503 when the passcode store is unreachable.
pub async fn health_check<S, P>(state: web::Data<AppState<S, P>>) -> HttpResponse
where
    S: SmsServiceTrait + 'static,
    P: PasscodeStore + 'static,
{
    let store = state.otp_service.store().backend_name();

    match state.otp_service.store_health().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse::healthy(
            SERVICE_NAME,
            env!("CARGO_PKG_VERSION"),
            store,
        )),
        Err(e) => {
            log::error!("Health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(HealthResponse::degraded(
                SERVICE_NAME,
                env!("CARGO_PKG_VERSION"),
                store,
            ))
        }
    }
}
