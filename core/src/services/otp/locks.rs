//! Per-phone-number locking for passcode read-modify-write

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Async locks keyed by phone number
///
/// Operations on different numbers never wait on each other. An entry is
/// dropped from the table once no guard or waiter holds it.
#[derive(Debug, Default)]
pub(crate) struct PhoneLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl PhoneLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `phone`'s record
    pub(crate) async fn acquire(&self, phone: &str) -> PhoneLockGuard<'_> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            locks.entry(phone.to_string()).or_default().clone()
        };

        PhoneLockGuard {
            locks: self,
            phone: phone.to_string(),
            guard: Some(lock.lock_owned().await),
        }
    }

    /// Number of phone numbers with a live lock entry
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

/// Held while a phone number's record is being read and rewritten
pub(crate) struct PhoneLockGuard<'a> {
    locks: &'a PhoneLocks,
    phone: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for PhoneLockGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();

        // Cloning from and removing from the table both happen under its
        // mutex, so a count of one means nobody is holding or waiting
        let mut locks = self
            .locks
            .locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if locks
            .get(&self.phone)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.phone);
        }
    }
}
