//! The session store: current user, persistence and credit debits.

use std::time::Duration;

use mailscribe_store::KeyValueStore;
use mailscribe_types::User;

use crate::accounts;
use crate::SessionError;

/// Storage key of the persisted current user.
pub const SESSION_KEY: &str = "mailscribe_user";

/// Tunables for the session store.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Simulated round-trip for login and signup.
    pub auth_latency: Duration,
    /// Key under which the current user is persisted.
    pub storage_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auth_latency: Duration::from_millis(1000),
            storage_key: SESSION_KEY.to_string(),
        }
    }
}

/// Owns the signed-in user. Every mutation persists the full record.
pub struct SessionStore<S> {
    storage: S,
    config: SessionConfig,
    current: Option<User>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Create an empty session. Call [`restore_session`](Self::restore_session)
    /// to pick up a persisted user.
    pub fn new(storage: S, config: SessionConfig) -> Self {
        Self {
            storage,
            config,
            current: None,
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Sign in with one of the fixed credential pairs.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&User, SessionError> {
        tokio::time::sleep(self.config.auth_latency).await;

        let Some(user) = accounts::authenticate(email, password) else {
            tracing::warn!(email, "login rejected");
            return Err(SessionError::InvalidCredentials);
        };

        self.persist(&user)?;
        tracing::info!(user_id = %user.id, admin = user.is_privileged(), "logged in");
        Ok(self.current.insert(user))
    }

    /// Create a new account and sign it in. No uniqueness check is made.
    pub async fn signup(
        &mut self,
        name: &str,
        email: &str,
        _password: &str,
    ) -> Result<&User, SessionError> {
        tokio::time::sleep(self.config.auth_latency).await;

        let user = accounts::new_member(name, email);
        self.persist(&user)?;
        tracing::info!(user_id = %user.id, "account created");
        Ok(self.current.insert(user))
    }

    /// Clear the current user and its persisted record.
    ///
    /// Never fails: a storage error is logged and the in-memory session is
    /// cleared regardless.
    pub fn logout(&mut self) {
        self.current = None;
        if let Err(e) = self.storage.delete_value(&self.config.storage_key) {
            tracing::warn!("failed to remove persisted session: {e}");
        }
        tracing::info!("logged out");
    }

    /// Load the persisted user, if any.
    ///
    /// Unreadable or unparsable records are logged and treated as no session.
    pub fn restore_session(&mut self) -> Option<&User> {
        self.current = match self.storage.get_value(&self.config.storage_key) {
            Ok(Some(bytes)) => match serde_json::from_slice::<User>(&bytes) {
                Ok(user) => {
                    tracing::debug!(user_id = %user.id, "restored session");
                    Some(user)
                }
                Err(e) => {
                    tracing::warn!("failed to parse stored user data: {e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("failed to read stored session: {e}");
                None
            }
        };
        self.current.as_ref()
    }

    /// Charge `amount` credits to the current user and persist.
    ///
    /// No-op without a session or for privileged accounts. Not deduplicated:
    /// calling twice charges twice.
    pub fn debit_credits(&mut self, amount: u64) -> Result<(), SessionError> {
        let Some(user) = self.current.as_ref() else {
            return Ok(());
        };

        let mut updated = user.clone();
        if !updated.debit_credits(amount) {
            tracing::debug!(user_id = %updated.id, amount, "privileged account, debit skipped");
            return Ok(());
        }

        self.persist(&updated)?;
        tracing::debug!(
            user_id = %updated.id,
            amount,
            available = updated.credits.available,
            "credits debited"
        );
        self.current = Some(updated);
        Ok(())
    }

    fn persist(&self, user: &User) -> Result<(), SessionError> {
        let json =
            serde_json::to_vec(user).map_err(|e| SessionError::Serialization(e.to_string()))?;
        self.storage.put_value(&self.config.storage_key, &json)?;
        Ok(())
    }
}
