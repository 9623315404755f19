//! sqlx/PostgreSQL implementations of the store traits.
//!
//! The schema lives under `migrations/` and is applied at startup with
//! `sqlx::migrate!`. Patch application happens inside a single `UPDATE`
//! statement, so each record mutation is atomic at the row level; concurrent
//! updates to the same task are last-write-wins.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Account, NewAccount, StoredAccount, Task, TaskPatch};
use crate::store::{AccountStore, StoreError, TaskStore};

#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn insert(&self, new: NewAccount) -> Result<Account, StoreError> {
        let account = Account::new(new.name, new.email);

        // The unique index on lower(email) turns a duplicate registration
        // into a unique violation, mapped to StoreError::Conflict.
        let created = sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (id, name, email, password_hash, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, name, email, created_at, updated_at",
        )
        .bind(account.id)
        .bind(&account.name)
        .bind(&account.email)
        .bind(&new.password_hash)
        .bind(account.created_at)
        .bind(account.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<StoredAccount>, StoreError> {
        let stored = sqlx::query_as::<_, StoredAccount>(
            "SELECT id, name, email, created_at, updated_at, password_hash
             FROM accounts WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stored)
    }
}

#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn insert(&self, task: Task) -> Result<Task, StoreError> {
        let created = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (id, title, description, status, due_date, owner_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id, title, description, status, due_date, owner_id, created_at, updated_at",
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(task.due_date)
        .bind(task.owner_id)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, status, due_date, owner_id, created_at, updated_at
             FROM tasks WHERE owner_id = $1
             ORDER BY created_at DESC, id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn update(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        patch: TaskPatch,
    ) -> Result<Task, StoreError> {
        // Absent patch fields fall back to the current column value. The
        // owner_id predicate makes a foreign-owned task indistinguishable
        // from a missing one.
        let updated = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET
                 title = COALESCE($3, title),
                 description = COALESCE($4, description),
                 status = COALESCE($5, status),
                 due_date = COALESCE($6, due_date),
                 updated_at = NOW()
             WHERE id = $2 AND owner_id = $1
             RETURNING id, title, description, status, due_date, owner_id, created_at, updated_at",
        )
        .bind(owner_id)
        .bind(task_id)
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(patch.status)
        .bind(patch.due_date)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or(StoreError::NotFound)
    }

    async fn delete(&self, owner_id: Uuid, task_id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(task_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
