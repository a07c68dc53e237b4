//! Application state, route table and server startup

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};

use cc_core::services::{OtpService, OtpServiceConfig, PasscodeStore, SmsServiceTrait};
use cc_shared::AppConfig;

use crate::handlers::{json_config, not_found};
use crate::middleware::cors::create_cors;
use crate::routes::{health::health_check, otp, session::session_route};

/// Application state that holds shared services
pub struct AppState<S, P>
where
    S: SmsServiceTrait,
    P: PasscodeStore,
{
    pub otp_service: Arc<OtpService<S, P>>,
}

impl<S, P> AppState<S, P>
where
    S: SmsServiceTrait,
    P: PasscodeStore,
{
    pub fn new(otp_service: OtpService<S, P>) -> Self {
        Self {
            otp_service: Arc::new(otp_service),
        }
    }
}

/// Register every route, with JSON bodies capped at `json_limit` bytes
///
/// The caller adds the default 404 service, since a `ServiceConfig` cannot.
pub fn configure<S, P>(json_limit: usize) -> impl FnOnce(&mut web::ServiceConfig)
where
    S: SmsServiceTrait + 'static,
    P: PasscodeStore + 'static,
{
    move |cfg| {
        cfg.app_data(json_config(json_limit))
            .route("/health", web::get().to(health_check::<S, P>))
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/otp")
                            .route("/send", web::post().to(otp::send_code::<S, P>))
                            .route("/verify", web::post().to(otp::verify_code::<S, P>)),
                    )
                    .route("/session/route", web::get().to(session_route)),
            )
            // Unversioned paths used by the web client
            .route("/api/send-otp", web::post().to(otp::send_code::<S, P>))
            .route("/api/verify-otp", web::post().to(otp::verify_code::<S, P>));
    }
}

/// Build the passcode service and run the HTTP server until shutdown
pub async fn run_server<S, P>(
    config: AppConfig,
    sms_service: Arc<S>,
    store: Arc<P>,
) -> anyhow::Result<()>
where
    S: SmsServiceTrait + 'static,
    P: PasscodeStore + 'static,
{
    let otp_config = OtpServiceConfig::from(&config.otp);
    otp_config.validate()?;

    log::info!(
        "Passcode service: store={}, expiry={}s, max_attempts={}, phone_format={:?}, cooldown={:?}",
        store.backend_name(),
        otp_config.code_expiration_seconds,
        otp_config.max_attempts,
        otp_config.phone_format,
        otp_config.cooldown_policy
    );

    let state = web::Data::new(AppState::new(OtpService::new(
        sms_service,
        store,
        otp_config,
    )));

    let bind_address = config.server.bind_address();
    let json_limit = config.server.max_payload_size;
    let cors_config = config.cors.clone();
    let environment = config.environment;

    log::info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(create_cors(&cors_config, environment))
            .configure(configure::<S, P>(json_limit))
            .default_service(web::route().to(not_found))
    });

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;
    Ok(())
}
