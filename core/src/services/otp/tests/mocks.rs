//! Mock implementations for testing the passcode service

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::entities::PasscodeRecord;
use crate::errors::StoreError;
use crate::services::otp::traits::{PasscodeStore, SmsServiceTrait};

// Mock SMS service recording the last code sent to each number
pub struct MockSmsService {
    pub sent_messages: Arc<Mutex<HashMap<String, String>>>,
    pub should_fail: AtomicBool,
    sent_count: AtomicUsize,
}

impl MockSmsService {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_messages: Arc::new(Mutex::new(HashMap::new())),
            should_fail: AtomicBool::new(should_fail),
            sent_count: AtomicUsize::new(0),
        }
    }

    pub fn set_failing(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn get_sent_code(&self, phone: &str) -> Option<String> {
        self.sent_messages.lock().unwrap().get(phone).cloned()
    }

    pub fn sent_count(&self) -> usize {
        self.sent_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SmsServiceTrait for MockSmsService {
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("SMS service error".to_string());
        }
        self.sent_messages
            .lock()
            .unwrap()
            .insert(phone.to_string(), code.to_string());
        let n = self.sent_count.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("mock-msg-{}", n))
    }
}

// Store whose every operation fails
pub struct FailingStore;

#[async_trait]
impl PasscodeStore for FailingStore {
    async fn put(&self, _phone: &str, _record: PasscodeRecord) -> Result<(), StoreError> {
        Err(StoreError::Backend("store unavailable".to_string()))
    }

    async fn get(&self, _phone: &str) -> Result<Option<PasscodeRecord>, StoreError> {
        Err(StoreError::Backend("store unavailable".to_string()))
    }

    async fn remove(&self, _phone: &str) -> Result<(), StoreError> {
        Err(StoreError::Backend("store unavailable".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(StoreError::Backend("store unavailable".to_string()))
    }
}
