//! Repository for the `categories` table. All lookups are ownership-scoped.

use sqlx::PgPool;
use taskforge_core::types::DbId;

use crate::models::category::{Category, UpdateCategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, color, is_default, created_at, updated_at";

/// Seed set created for every new user at registration.
const DEFAULTS: &[(&str, &str)] = &[
    ("Personal", "#3b82f6"),
    ("Work", "#ef4444"),
    ("Shopping", "#22c55e"),
];

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category for the given user, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
        color: Option<&str>,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (user_id, name, color)
             VALUES ($1, $2, COALESCE($3, '#6b7280'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .bind(name)
            .bind(color)
            .fetch_one(pool)
            .await
    }

    /// Insert the default category set for a new user.
    pub async fn create_defaults(pool: &PgPool, user_id: DbId) -> Result<(), sqlx::Error> {
        for (name, color) in DEFAULTS {
            sqlx::query(
                "INSERT INTO categories (user_id, name, color, is_default)
                 VALUES ($1, $2, $3, TRUE)",
            )
            .bind(user_id)
            .bind(name)
            .bind(color)
            .execute(pool)
            .await?;
        }
        Ok(())
    }

    /// Find a category by id, scoped to its owner.
    pub async fn find_one(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all categories owned by a user, defaults first, then by name.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories
             WHERE user_id = $1
             ORDER BY is_default DESC, name ASC"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a category. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the category does not exist or belongs to another
    /// user.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                name = COALESCE($3, name),
                color = COALESCE($4, color),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category owned by the user. Returns `true` if a row was
    /// removed. Tasks filed under it fall back to no category (FK SET NULL).
    pub async fn remove(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
