/// Task model and database operations
///
/// Tasks are the per-user to-do items. `owner_id` is a weak foreign key to
/// `users.id` — it carries no referential action — and it is the sole
/// authorization boundary in the system: every read, update, and delete
/// filters by `(id AND owner_id)`. A task id alone never suffices to touch
/// another user's task; a mismatched owner is a silent no-op, not an error.
///
/// # State machine
///
/// ```text
/// incomplete ⇄ completed      (via the completed flag in update_owned)
/// ```
///
/// Deletion removes the record entirely; it is a lifecycle end, not a state.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID NOT NULL,
///     title TEXT NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// To-do item owned by a single user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (store-generated UUID)
    pub id: Uuid,

    /// Owner (weak reference to users.id); the authorization boundary
    pub owner_id: Uuid,

    /// Short title; empty strings are accepted
    pub title: String,

    /// Free-form description; empty strings are accepted
    pub description: String,

    /// Whether the task is done (defaults to false on creation)
    pub completed: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// The owner id always comes from the authenticated session, never from
/// client-supplied data.
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Owning user
    pub owner_id: Uuid,

    /// Task title
    pub title: String,

    /// Task description
    pub description: String,
}

/// Input for updating an existing task
///
/// All three fields are applied unconditionally; the form always submits
/// the full record.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    /// New title
    pub title: String,

    /// New description
    pub description: String,

    /// New completion state
    pub completed: bool,
}

impl Task {
    /// Inserts a new task with `completed = false`
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (owner_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, title, description, completed, created_at, updated_at
            "#,
        )
        .bind(data.owner_id)
        .bind(data.title)
        .bind(data.description)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks belonging to `owner_id`
    ///
    /// Ordered by creation time for stable rendering; the ordering is not
    /// part of the contract.
    pub async fn list_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, description, completed, created_at, updated_at
            FROM tasks
            WHERE owner_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Finds a task by ID, scoped to its owner
    ///
    /// Returns `None` when the task does not exist or belongs to someone
    /// else; callers must render an explicit not-found state.
    pub async fn find_by_id_and_owner(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, description, completed, created_at, updated_at
            FROM tasks
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Applies an update to the task matching both `id` and `owner_id`
    ///
    /// A mismatched owner affects zero rows and returns `None` — intentional
    /// scoping, not a retryable failure.
    pub async fn update_owned(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $3,
                description = $4,
                completed = $5,
                updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, title, description, completed, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.completed)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes the task matching both `id` and `owner_id`
    ///
    /// Idempotent: deleting a missing or already-deleted task returns
    /// `false` rather than an error. A mismatched owner is a silent no-op.
    pub async fn delete_owned(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_task_default() {
        let update = UpdateTask::default();
        assert!(update.title.is_empty());
        assert!(update.description.is_empty());
        assert!(!update.completed);
    }

    #[test]
    fn test_create_task_struct() {
        let owner = Uuid::new_v4();
        let create = CreateTask {
            owner_id: owner,
            title: "buy milk".to_string(),
            description: String::new(),
        };

        assert_eq!(create.owner_id, owner);
        assert_eq!(create.title, "buy milk");
        // Empty descriptions are allowed
        assert!(create.description.is_empty());
    }

    // Owner-scoping invariants are covered in tests/ownership_tests.rs
}
