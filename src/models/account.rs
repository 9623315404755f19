use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The public shape of an account, as persisted and as returned by the API.
/// The password hash lives in [`StoredAccount`] and is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique identifier for the account (UUID v4), assigned at creation.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address, normalized to lowercase. Unique across all accounts.
    pub email: String,
    /// Timestamp of when the account was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the account.
    pub updated_at: DateTime<Utc>,
}

/// Input to the credential store when registering a new account.
/// Carries the already-hashed password; plaintext never reaches the store.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// An account together with its password hash, as read back from the
/// credential store during login. Deliberately not `Serialize`.
#[derive(Debug, Clone, FromRow)]
pub struct StoredAccount {
    #[sqlx(flatten)]
    pub account: Account,
    pub password_hash: String,
}

impl Account {
    /// Builds a new `Account` from registration input, assigning a fresh id
    /// and setting both timestamps to now. The email is lowercased so that
    /// uniqueness and login lookups are case-insensitive.
    pub fn new(name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email: email.to_lowercase(),
            created_at: now,
            updated_at: now,
        }
    }
}
