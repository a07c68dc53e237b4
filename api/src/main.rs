use std::sync::Arc;

use anyhow::Context;
use log::{info, warn};

use cc_api::app::run_server;
use cc_core::services::InMemoryPasscodeStore;
use cc_infra::cache::{RedisClient, RedisPasscodeStore};
use cc_infra::sms::{create_sms_service, SmsServiceAdapter};
use cc_shared::config::{SmsProvider, StoreBackend};
use cc_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.environment.default_log_filter()),
    );

    info!("Starting Civic Connect API Server ({})", config.environment);

    if config.is_production() && config.sms.provider == SmsProvider::Mock {
        warn!("Mock SMS provider in production: passcodes are printed, not delivered");
    }

    let sms_service = create_sms_service(&config.sms).context("Failed to create SMS service")?;
    let sms_service = Arc::new(SmsServiceAdapter::new(sms_service));

    match config.store {
        StoreBackend::Memory => {
            warn!("Using in-memory passcode store; outstanding codes are lost on restart");
            run_server(config, sms_service, Arc::new(InMemoryPasscodeStore::new())).await
        }
        StoreBackend::Redis => {
            let client = RedisClient::new(config.cache.clone())
                .await
                .context("Failed to connect to Redis")?;
            run_server(config, sms_service, Arc::new(RedisPasscodeStore::new(client))).await
        }
    }
}
