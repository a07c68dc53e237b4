//! Redis-backed passcode store
//!
//! Each record is stored as JSON under `otp:record:{phone}` (behind the
//! configured key prefix). Keys carry a Redis TTL of the record's remaining
//! lifetime plus a grace period, so an expired record is still readable for
//! a short while and verification can report it as expired rather than
//! missing. Abandoned records are reclaimed by Redis without a sweeper.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use cc_core::domain::entities::PasscodeRecord;
use cc_core::errors::StoreError;
use cc_core::services::PasscodeStore;
use cc_shared::phone::mask_phone_number;

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// Redis key namespace for passcode records
const RECORD_KEY_PREFIX: &str = "otp:record";

/// Seconds a record outlives its expiry in Redis
pub const DEFAULT_GRACE_SECONDS: u64 = 60;

/// Passcode store persisting records in Redis
#[derive(Clone)]
pub struct RedisPasscodeStore {
    client: RedisClient,
    grace_seconds: u64,
}

impl RedisPasscodeStore {
    pub fn new(client: RedisClient) -> Self {
        Self {
            client,
            grace_seconds: DEFAULT_GRACE_SECONDS,
        }
    }

    /// Override how long records survive past their expiry
    pub fn with_grace_seconds(mut self, grace_seconds: u64) -> Self {
        self.grace_seconds = grace_seconds;
        self
    }

    /// Full Redis key for a phone number's record
    pub fn record_key(&self, phone: &str) -> String {
        record_key(&self.client.config().make_key(RECORD_KEY_PREFIX), phone)
    }
}

#[async_trait]
impl PasscodeStore for RedisPasscodeStore {
    async fn put(&self, phone: &str, record: PasscodeRecord) -> Result<(), StoreError> {
        let key = self.record_key(phone);
        let payload = encode_record(&record)?;
        let ttl = key_ttl_seconds(&record, Utc::now(), self.grace_seconds);

        self.client.set_with_expiry(&key, &payload, ttl).await?;
        debug!(
            phone = %mask_phone_number(phone),
            ttl_seconds = ttl,
            attempts = record.attempts,
            "Stored passcode record in Redis"
        );
        Ok(())
    }

    async fn get(&self, phone: &str) -> Result<Option<PasscodeRecord>, StoreError> {
        let key = self.record_key(phone);
        match self.client.get(&key).await? {
            Some(payload) => Ok(Some(decode_record(&payload)?)),
            None => Ok(None),
        }
    }

    async fn remove(&self, phone: &str) -> Result<(), StoreError> {
        let key = self.record_key(phone);
        self.client.delete(&key).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        if self.client.health_check().await? {
            Ok(())
        } else {
            Err(StoreError::Backend("Redis did not answer PING".to_string()))
        }
    }
}

pub(crate) fn record_key(namespace: &str, phone: &str) -> String {
    format!("{}:{}", namespace, phone)
}

/// Redis TTL for a record written at `now`; never zero, which Redis rejects
pub(crate) fn key_ttl_seconds(record: &PasscodeRecord, now: DateTime<Utc>, grace_seconds: u64) -> u64 {
    let remaining = record.seconds_until_expiry(now).max(0) as u64;
    (remaining + grace_seconds).max(1)
}

pub(crate) fn encode_record(record: &PasscodeRecord) -> Result<String, InfrastructureError> {
    Ok(serde_json::to_string(record)?)
}

pub(crate) fn decode_record(payload: &str) -> Result<PasscodeRecord, InfrastructureError> {
    Ok(serde_json::from_str(payload)?)
}
