//! Nullable store: thread-safe in-memory key-value storage for testing.

use mailscribe_store::{KeyValueStore, StoreError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// An in-memory key-value store for testing.
///
/// Can be switched into a failing mode to exercise storage error paths.
pub struct NullStore {
    values: Mutex<HashMap<String, Vec<u8>>>,
    failing: AtomicBool,
    writes: AtomicUsize,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            failing: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    /// Pre-populate `key` with raw bytes (e.g. a corrupted record).
    pub fn with_value(self, key: &str, value: &[u8]) -> Self {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_vec());
        self
    }

    /// Make every subsequent call fail with a backend error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of successful puts and deletes.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw stored bytes, bypassing the failure switch.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Backend("null store set to fail".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for NullStore {
    fn put_value(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.check()?;
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn get_value(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.check()?;
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn delete_value(&self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        self.values.lock().unwrap().remove(key);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
