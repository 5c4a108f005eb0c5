//! User identity and credit ledger.

use serde::{Deserialize, Serialize};

/// Reserved administrator email.
pub const ADMIN_EMAIL: &str = "admin@mailscribe.com";
/// Reserved administrator id.
pub const ADMIN_USER_ID: &str = "admin-user-id";

/// Credit balance. One credit is spent per verified email.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCredits {
    pub available: u64,
    pub used: u64,
    pub plan_limit: u64,
}

impl UserCredits {
    pub fn new(available: u64, used: u64, plan_limit: u64) -> Self {
        Self {
            available,
            used,
            plan_limit,
        }
    }

    /// `available` saturates at zero; `used` grows by the full amount.
    pub fn debit(&mut self, amount: u64) {
        self.available = self.available.saturating_sub(amount);
        self.used = self.used.saturating_add(amount);
    }
}

/// The signed-in account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub credits: UserCredits,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl User {
    /// Whether credit enforcement is bypassed for this account.
    ///
    /// The explicit flag decides when present. Records persisted without the
    /// flag fall back to the reserved administrator identity.
    pub fn is_privileged(&self) -> bool {
        match self.is_admin {
            Some(flag) => flag,
            None => self.email == ADMIN_EMAIL || self.id == ADMIN_USER_ID,
        }
    }

    /// Whether a run of `count` emails fits the balance.
    pub fn can_afford(&self, count: u64) -> bool {
        self.is_privileged() || self.credits.available >= count
    }

    /// Charge `amount` credits. Privileged accounts are never charged.
    /// Returns whether the ledger changed.
    pub fn debit_credits(&mut self, amount: u64) -> bool {
        if self.is_privileged() {
            return false;
        }
        self.credits.debit(amount);
        true
    }
}
