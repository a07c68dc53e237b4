//! Process-local passcode store
//!
//! Records live only in this process: a restart drops every outstanding
//! passcode and separate worker processes do not see each other's records.
//! Use the Redis store when either matters.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::PasscodeRecord;
use crate::errors::StoreError;

use super::traits::PasscodeStore;

/// In-memory passcode store backed by a lock-guarded map
#[derive(Debug, Default)]
pub struct InMemoryPasscodeStore {
    records: RwLock<HashMap<String, PasscodeRecord>>,
}

impl InMemoryPasscodeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held, expired ones included
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl PasscodeStore for InMemoryPasscodeStore {
    async fn put(&self, phone: &str, record: PasscodeRecord) -> Result<(), StoreError> {
        self.records.write().await.insert(phone.to_string(), record);
        Ok(())
    }

    async fn get(&self, phone: &str) -> Result<Option<PasscodeRecord>, StoreError> {
        Ok(self.records.read().await.get(phone).cloned())
    }

    async fn remove(&self, phone: &str) -> Result<(), StoreError> {
        self.records.write().await.remove(phone);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_put_overwrites_existing_record() {
        let store = InMemoryPasscodeStore::new();
        let now = Utc::now();

        store.put("9876543210", PasscodeRecord::issue("111111", now, 300)).await.unwrap();
        store.put("9876543210", PasscodeRecord::issue("222222", now, 300)).await.unwrap();

        let record = store.get("9876543210").await.unwrap().unwrap();
        assert_eq!(record.code, "222222");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove_missing_record_is_ok() {
        let store = InMemoryPasscodeStore::new();
        assert!(store.remove("9876543210").await.is_ok());
        assert!(store.get("9876543210").await.unwrap().is_none());
        assert!(store.is_empty().await);
    }
}
