//! Repository interfaces for the credential and task stores.
//!
//! Handlers talk to the stores only through these traits, so the persistence
//! backend stays an external collaborator. Two implementations exist:
//! [`postgres`] is the production backend, [`memory`] backs the integration
//! tests. Every task access is keyed by `(owner_id, task_id)`, which makes
//! cross-owner reads impossible at the interface level and collapses "absent"
//! and "owned by someone else" into the same `NotFound`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Account, NewAccount, StoredAccount, Task, TaskPatch};

/// Failures surfaced by a store. Translated into `AppError` at the service
/// boundary; `Backend` carries the driver detail for logging only.
#[derive(Debug)]
pub enum StoreError {
    /// A uniqueness constraint was violated (duplicate email).
    Conflict,
    /// No record matched, or the record is owned by a different account.
    NotFound,
    /// Any other driver-level failure.
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> StoreError {
        match &error {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::Conflict,
            _ => StoreError::Backend(error.to_string()),
        }
    }
}

/// Persists accounts and enforces email uniqueness.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Inserts a new account. Fails with `StoreError::Conflict` if the email
    /// is already registered; the check is part of the insert, not a
    /// separate read, so concurrent registrations cannot both succeed.
    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// Looks up an account (with its password hash) by lowercased email.
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredAccount>, StoreError>;
}

/// Persists tasks. All lookups are scoped to the owning account.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persists a freshly built task.
    async fn insert(&self, task: Task) -> Result<Task, StoreError>;

    /// Returns all tasks owned by `owner_id`, newest first.
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Task>, StoreError>;

    /// Applies `patch` to the task as a single read-modify-write on the
    /// record and returns the updated task. `NotFound` if the task does not
    /// exist or belongs to another account.
    async fn update(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        patch: TaskPatch,
    ) -> Result<Task, StoreError>;

    /// Removes the task. Same ownership rule as `update`; the delete is
    /// final.
    async fn delete(&self, owner_id: Uuid, task_id: Uuid) -> Result<(), StoreError>;
}
