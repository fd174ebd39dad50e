//! Repository for the `sessions` table.
//!
//! Holds the one operation in the system that must span two writes
//! atomically: [`SessionRepo::rotate`], which revokes a session and inserts
//! its successor in a single transaction.

use sqlx::PgPool;
use taskforge_core::types::DbId;
use uuid::Uuid;

use crate::models::session::{CreateSession, Session};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, jti, user_id, refresh_token_hash, platform, device_label, \
                        user_agent, ip_address, expires_at, revoked_at, replaced_by_jti, \
                        created_at, last_used_at";

/// Provides persistence operations for sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session row (a chain root), returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (jti, user_id, refresh_token_hash, platform,
                                   device_label, user_agent, ip_address, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(input.jti)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.platform)
            .bind(&input.device_label)
            .bind(&input.user_agent)
            .bind(&input.ip_address)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a session by its public identifier, regardless of liveness.
    ///
    /// Liveness and revocation are judged by the caller so it can
    /// distinguish "revoked" (reuse detection) from "expired".
    pub async fn find_by_jti(pool: &PgPool, jti: Uuid) -> Result<Option<Session>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE jti = $1");
        sqlx::query_as::<_, Session>(&query)
            .bind(jti)
            .fetch_optional(pool)
            .await
    }

    /// Rotate a session: revoke the current row and insert its successor as
    /// one transaction.
    ///
    /// The revoke is conditioned on `revoked_at IS NULL`, so of two refresh
    /// calls racing on the same jti at most one observes the row as live and
    /// proceeds; the loser gets `Ok(None)` and the transaction rolls back
    /// with nothing written. On success returns the successor row.
    pub async fn rotate(
        pool: &PgPool,
        current_id: DbId,
        successor: &CreateSession,
    ) -> Result<Option<Session>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let revoked = sqlx::query(
            "UPDATE sessions
             SET revoked_at = NOW(), replaced_by_jti = $2, last_used_at = NOW()
             WHERE id = $1 AND revoked_at IS NULL",
        )
        .bind(current_id)
        .bind(successor.jti)
        .execute(&mut *tx)
        .await?;

        if revoked.rows_affected() == 0 {
            // Lost the race: a concurrent rotation already revoked this row.
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO sessions (jti, user_id, refresh_token_hash, platform,
                                   device_label, user_agent, ip_address, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, Session>(&query)
            .bind(successor.jti)
            .bind(successor.user_id)
            .bind(&successor.refresh_token_hash)
            .bind(successor.platform)
            .bind(&successor.device_label)
            .bind(&successor.user_agent)
            .bind(&successor.ip_address)
            .bind(successor.expires_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(created))
    }

    /// Terminally revoke a session (logout). No `replaced_by_jti` is set.
    ///
    /// Returns `true` if the row was live and is now revoked, `false` if it
    /// was already revoked.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sessions SET revoked_at = NOW() WHERE id = $1 AND revoked_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List every session row for a user, newest first. Test/diagnostic aid.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Session>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM sessions WHERE user_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Session>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Delete expired or revoked rows. Housekeeping only; never called by
    /// the lifecycle engine.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM sessions WHERE expires_at < NOW() OR revoked_at IS NOT NULL")
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }
}
