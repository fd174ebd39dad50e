//! Repository for the `tasks` table. All lookups are ownership-scoped.

use sqlx::PgPool;
use taskforge_core::types::DbId;

use crate::models::task::{CreateTask, Task, TaskStats, TaskStatus, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, category_id, title, description, status, due_date, created_at, updated_at";

/// Optional filters for listing tasks.
#[derive(Debug, Default, serde::Deserialize)]
pub struct TaskListParams {
    pub status: Option<TaskStatus>,
    pub category_id: Option<DbId>,
}

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task for the given user, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (user_id, category_id, title, description, due_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.due_date)
            .fetch_one(pool)
            .await
    }

    /// Find a task by id, scoped to its owner.
    pub async fn find_one(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List the user's tasks, optionally filtered by status and category,
    /// newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        params: &TaskListParams,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE user_id = $1
               AND ($2::task_status IS NULL OR status = $2)
               AND ($3::BIGINT IS NULL OR category_id = $3)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .bind(params.status)
            .bind(params.category_id)
            .fetch_all(pool)
            .await
    }

    /// Update a task. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the task does not exist or belongs to another user.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                category_id = COALESCE($6, category_id),
                due_date = COALESCE($7, due_date),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.category_id)
            .bind(input.due_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task owned by the user. Returns `true` if a row was removed.
    pub async fn remove(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Per-status counts across all of the user's tasks.
    pub async fn stats_for_user(pool: &PgPool, user_id: DbId) -> Result<TaskStats, sqlx::Error> {
        sqlx::query_as::<_, TaskStats>(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'PENDING') AS pending,
                COUNT(*) FILTER (WHERE status = 'IN_PROGRESS') AS in_progress,
                COUNT(*) FILTER (WHERE status = 'DONE') AS done
             FROM tasks WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
