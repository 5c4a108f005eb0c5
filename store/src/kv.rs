//! Durable key-value storage trait.

use std::sync::Arc;

use crate::StoreError;

/// A flat key-value store of opaque byte values.
///
/// Writes must be durable once the call returns. Absent keys read as `None`
/// rather than an error; deleting an absent key succeeds.
pub trait KeyValueStore {
    /// Store `value` under `key`, replacing any previous value.
    fn put_value(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Retrieve the value stored under `key`.
    fn get_value(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Remove `key`.
    fn delete_value(&self, key: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn put_value(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).put_value(key, value)
    }

    fn get_value(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get_value(key)
    }

    fn delete_value(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete_value(key)
    }
}
