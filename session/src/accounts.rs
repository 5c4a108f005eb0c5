//! Fixed demo accounts and the starter allotment for new signups.

use mailscribe_types::{User, UserCredits, ADMIN_EMAIL, ADMIN_USER_ID};

/// A hard-coded email/password pair accepted by `login`.
#[derive(Clone, Copy, Debug)]
pub struct Credential {
    pub email: &'static str,
    pub password: &'static str,
}

impl Credential {
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

pub const DEMO_LOGIN: Credential = Credential {
    email: "demo@example.com",
    password: "password",
};

pub const ADMIN_LOGIN: Credential = Credential {
    email: ADMIN_EMAIL,
    password: "admin",
};

/// Credits granted to every new account (and held by the demo account).
pub fn starter_credits() -> UserCredits {
    UserCredits::new(85, 15, 100)
}

/// The record signed in by [`DEMO_LOGIN`].
pub fn demo_user() -> User {
    User {
        id: "user-1".to_string(),
        name: "John Doe".to_string(),
        email: "john.doe@example.com".to_string(),
        credits: starter_credits(),
        is_admin: Some(false),
    }
}

/// The record signed in by [`ADMIN_LOGIN`]. Its balance is never consulted.
pub fn admin_user() -> User {
    User {
        id: ADMIN_USER_ID.to_string(),
        name: "Administrator".to_string(),
        email: ADMIN_EMAIL.to_string(),
        credits: UserCredits::new(1_000_000, 0, 1_000_000),
        is_admin: Some(true),
    }
}

/// Resolve a credential pair to its fixed account.
pub fn authenticate(email: &str, password: &str) -> Option<User> {
    if DEMO_LOGIN.matches(email, password) {
        Some(demo_user())
    } else if ADMIN_LOGIN.matches(email, password) {
        Some(admin_user())
    } else {
        None
    }
}

/// A fresh, unprivileged account with the starter allotment.
pub fn new_member(name: &str, email: &str) -> User {
    User {
        id: format!("user-{}", uuid::Uuid::new_v4()),
        name: name.to_string(),
        email: email.to_string(),
        credits: starter_credits(),
        is_admin: Some(false),
    }
}
