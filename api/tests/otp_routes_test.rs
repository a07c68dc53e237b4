//! Integration tests for the passcode and session routes

use actix_web::{http::header, http::StatusCode, test, web, App};
use serde_json::{json, Value};
use std::sync::Arc;

use cc_api::app::{configure, AppState};
use cc_api::handlers::not_found;
use cc_api::routes::otp::SEND_SUCCESS_MESSAGE;
use cc_core::services::otp::FixedCodeGenerator;
use cc_core::services::{InMemoryPasscodeStore, OtpService, OtpServiceConfig};
use cc_infra::sms::{MockSmsService, SmsServiceAdapter};
use cc_shared::config::CooldownPolicy;

type TestState = AppState<SmsServiceAdapter, InMemoryPasscodeStore>;

const JSON_LIMIT: usize = 16 * 1024;

fn create_test_app_state(config: OtpServiceConfig, sms_fails: bool) -> web::Data<TestState> {
    let sms = SmsServiceAdapter::new(Box::new(MockSmsService::with_options(false, sms_fails)));
    let service = OtpService::new(
        Arc::new(sms),
        Arc::new(InMemoryPasscodeStore::new()),
        config,
    )
    .with_generator(Arc::new(FixedCodeGenerator::new(["483920", "715302"])));

    web::Data::new(AppState::new(service))
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state)
                .configure(configure::<SmsServiceAdapter, InMemoryPasscodeStore>(JSON_LIMIT))
                .default_service(web::route().to(not_found)),
        )
        .await
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn test_send_then_verify_lifecycle() {
        let app = init_app!(create_test_app_state(OtpServiceConfig::default(), false));

        let req = test::TestRequest::post()
            .uri("/api/v1/otp/send")
            .set_json(json!({ "phoneNumber": "9876543210" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], SEND_SUCCESS_MESSAGE);
        assert!(!body.to_string().contains("483920"));

        let req = test::TestRequest::post()
            .uri("/api/v1/otp/verify")
            .set_json(json!({ "phoneNumber": "9876543210", "otp": "111111" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid OTP. 2 attempts remaining.");

        let req = test::TestRequest::post()
            .uri("/api/v1/otp/verify")
            .set_json(json!({ "phoneNumber": "9876543210", "otp": "483920" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "OTP verified successfully.");

        let req = test::TestRequest::post()
            .uri("/api/v1/otp/verify")
            .set_json(json!({ "phoneNumber": "9876543210", "otp": "483920" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("No OTP found"));
    }

    #[actix_rt::test]
    async fn test_unversioned_aliases() {
        let app = init_app!(create_test_app_state(OtpServiceConfig::default(), false));

        let req = test::TestRequest::post()
            .uri("/api/send-otp")
            .set_json(json!({ "phoneNumber": "9876543210" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/verify-otp")
            .set_json(json!({ "phoneNumber": "9876543210", "otp": "483920" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_rt::test]
    async fn test_send_invalid_phone_format() {
        let app = init_app!(create_test_app_state(OtpServiceConfig::default(), false));

        for phone in ["12345", "98765 43210", "+919876543210"] {
            let req = test::TestRequest::post()
                .uri("/api/v1/otp/send")
                .set_json(json!({ "phoneNumber": phone }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["success"], false);
            assert_eq!(body["message"], "Invalid phone number format.");
        }
    }

    #[actix_rt::test]
    async fn test_missing_fields_fail_format_checks() {
        let app = init_app!(create_test_app_state(OtpServiceConfig::default(), false));

        let req = test::TestRequest::post()
            .uri("/api/v1/otp/send")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid phone number format.");

        let req = test::TestRequest::post()
            .uri("/api/v1/otp/verify")
            .set_json(json!({ "phoneNumber": "9876543210" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid OTP format. Must be 6 digits.");
    }

    #[actix_rt::test]
    async fn test_verify_invalid_otp_format() {
        let app = init_app!(create_test_app_state(OtpServiceConfig::default(), false));

        for otp in ["12345", "1234567", "12a456"] {
            let req = test::TestRequest::post()
                .uri("/api/v1/otp/verify")
                .set_json(json!({ "phoneNumber": "9876543210", "otp": otp }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], "Invalid OTP format. Must be 6 digits.");
        }
    }

    #[actix_rt::test]
    async fn test_non_string_fields_fail_format_checks() {
        let app = init_app!(create_test_app_state(OtpServiceConfig::default(), false));

        let req = test::TestRequest::post()
            .uri("/api/v1/otp/send")
            .set_json(json!({ "phoneNumber": 9876543210u64 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid phone number format.");

        let req = test::TestRequest::post()
            .uri("/api/v1/otp/verify")
            .set_json(json!({ "phoneNumber": "9876543210", "otp": 483920 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid OTP format. Must be 6 digits.");
    }

    #[actix_rt::test]
    async fn test_malformed_json_body() {
        let app = init_app!(create_test_app_state(OtpServiceConfig::default(), false));

        let req = test::TestRequest::post()
            .uri("/api/v1/otp/send")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{\"phoneNumber\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid request body.");
    }

    #[actix_rt::test]
    async fn test_sms_failure_is_server_error() {
        let app = init_app!(create_test_app_state(OtpServiceConfig::default(), true));

        let req = test::TestRequest::post()
            .uri("/api/v1/otp/send")
            .set_json(json!({ "phoneNumber": "9876543210" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Failed to send OTP. Please try again later.");

        // Nothing was stored for the undelivered code
        let req = test::TestRequest::post()
            .uri("/api/v1/otp/verify")
            .set_json(json!({ "phoneNumber": "9876543210", "otp": "483920" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("No OTP found"));
    }

    #[actix_rt::test]
    async fn test_reject_cooldown_returns_too_many_requests() {
        let config = OtpServiceConfig {
            cooldown_policy: CooldownPolicy::Reject,
            resend_cooldown_seconds: 60,
            ..OtpServiceConfig::default()
        };
        let app = init_app!(create_test_app_state(config, false));

        let send = || {
            test::TestRequest::post()
                .uri("/api/v1/otp/send")
                .set_json(json!({ "phoneNumber": "9876543210" }))
                .to_request()
        };

        assert_eq!(test::call_service(&app, send()).await.status(), StatusCode::OK);

        let resp = test::call_service(&app, send()).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(resp.headers().contains_key(header::RETRY_AFTER));
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    #[actix_rt::test]
    async fn test_session_route_decisions() {
        let app = init_app!(create_test_app_state(OtpServiceConfig::default(), false));

        let cases = [
            ("unverified", "/reports", json!({ "decision": "redirect", "location": "/verify/phone" })),
            ("unverified", "/verify/otp", json!({ "decision": "allow" })),
            ("verified", "/verify/phone", json!({ "decision": "redirect", "location": "/" })),
            ("verified", "/reports/new", json!({ "decision": "allow" })),
            ("unknown", "/reports", json!({ "decision": "pending" })),
        ];

        for (state, path, expected) in cases {
            let req = test::TestRequest::get()
                .uri(&format!("/api/v1/session/route?state={}&path={}", state, path))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, expected, "state={} path={}", state, path);
        }

        let req = test::TestRequest::get()
            .uri("/api/v1/session/route?state=admin&path=/reports")
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_rt::test]
    async fn test_health_and_not_found() {
        let app = init_app!(create_test_app_state(OtpServiceConfig::default(), false));

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["store"], "memory");

        let req = test::TestRequest::get().uri("/api/v1/unknown").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
