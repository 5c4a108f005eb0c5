//! LMDB implementation of KeyValueStore.

use std::sync::Arc;

use heed::types::{Bytes, Str};
use heed::{Database, Env};

use mailscribe_store::{KeyValueStore, StoreError};

use crate::LmdbError;

/// One named LMDB database used as a flat key-value store.
#[derive(Clone)]
pub struct LmdbKeyValueStore {
    pub(crate) env: Arc<Env>,
    pub(crate) db: Database<Str, Bytes>,
}

impl KeyValueStore for LmdbKeyValueStore {
    fn put_value(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.db
            .put(&mut wtxn, key, value)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_value(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self.db.get(&rtxn, key).map_err(LmdbError::from)?;
        Ok(val.map(|bytes| bytes.to_vec()))
    }

    fn delete_value(&self, key: &str) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.db.delete(&mut wtxn, key).map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
