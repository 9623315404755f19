//! In-process implementations of the store traits, backed by locked hash
//! maps. Used by the integration tests so the full HTTP surface can be
//! exercised without a running database. The write lock is held across each
//! read-modify-write, giving the same per-record atomicity the Postgres
//! backend gets from a single-row UPDATE.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Account, NewAccount, StoredAccount, Task, TaskPatch};
use crate::store::{AccountStore, StoreError, TaskStore};

/// Accounts keyed by lowercased email.
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<String, StoredAccount>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn insert(&self, new: NewAccount) -> Result<Account, StoreError> {
        let account = Account::new(new.name, new.email);
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| StoreError::Backend("account store lock poisoned".into()))?;

        if accounts.contains_key(&account.email) {
            return Err(StoreError::Conflict);
        }

        accounts.insert(
            account.email.clone(),
            StoredAccount {
                account: account.clone(),
                password_hash: new.password_hash,
            },
        );
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<StoredAccount>, StoreError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StoreError::Backend("account store lock poisoned".into()))?;
        Ok(accounts.get(email).cloned())
    }
}

/// Tasks keyed by task id.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert(&self, task: Task) -> Result<Task, StoreError> {
        let mut tasks = self
            .tasks
            .write()
            .map_err(|_| StoreError::Backend("task store lock poisoned".into()))?;
        tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let tasks = self
            .tasks
            .read()
            .map_err(|_| StoreError::Backend("task store lock poisoned".into()))?;

        let mut owned: Vec<Task> = tasks
            .values()
            .filter(|task| task.owner_id == owner_id)
            .cloned()
            .collect();
        // Newest first, id as tiebreaker for a stable order.
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(owned)
    }

    async fn update(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        patch: TaskPatch,
    ) -> Result<Task, StoreError> {
        let mut tasks = self
            .tasks
            .write()
            .map_err(|_| StoreError::Backend("task store lock poisoned".into()))?;

        match tasks.get_mut(&task_id) {
            Some(task) if task.owner_id == owner_id => {
                task.apply_patch(patch);
                Ok(task.clone())
            }
            // Foreign-owned and missing look the same to the caller.
            _ => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, owner_id: Uuid, task_id: Uuid) -> Result<(), StoreError> {
        let mut tasks = self
            .tasks
            .write()
            .map_err(|_| StoreError::Backend("task store lock poisoned".into()))?;

        match tasks.get(&task_id) {
            Some(task) if task.owner_id == owner_id => {
                tasks.remove(&task_id);
                Ok(())
            }
            _ => Err(StoreError::NotFound),
        }
    }
}
