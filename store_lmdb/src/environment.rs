//! LMDB environment setup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use heed::types::{Bytes, Str};
use heed::{Database, Env, EnvOpenOptions};

use crate::{LmdbError, LmdbKeyValueStore};

/// Name of the database holding the persisted session record.
pub const SESSION_DB: &str = "session";

/// Maximum number of named databases in the environment.
const MAX_DBS: u32 = 4;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    session_db: Database<Str, Bytes>,
    path: PathBuf,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given directory.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per process for a given
        // directory and never concurrently remapped.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(MAX_DBS)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let session_db: Database<Str, Bytes> = env.create_database(&mut wtxn, Some(SESSION_DB))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), map_size, "opened LMDB environment");

        Ok(Self {
            env: Arc::new(env),
            session_db,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn env(&self) -> &Arc<Env> {
        &self.env
    }

    /// Key-value view over the session database.
    pub fn session_store(&self) -> LmdbKeyValueStore {
        LmdbKeyValueStore {
            env: Arc::clone(&self.env),
            db: self.session_db,
        }
    }
}
