//! Session model and DTOs.
//!
//! One row per step of a refresh-token rotation chain. Rows are never
//! mutated except to revoke; rotation inserts a successor and links the
//! old row forward via `replaced_by_jti`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskforge_core::types::{DbId, Timestamp};
use uuid::Uuid;

/// Client platform a session was opened from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "platform")]
#[serde(rename_all = "UPPERCASE")]
pub enum Platform {
    #[sqlx(rename = "WEB")]
    Web,
    #[sqlx(rename = "MOBILE")]
    Mobile,
}

/// A session row from the `sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    /// Public session identifier, embedded in both tokens of this step.
    /// Globally unique and immutable.
    pub jti: Uuid,
    pub user_id: DbId,
    /// Argon2id PHC hash of the exact refresh-token string issued for
    /// this step.
    pub refresh_token_hash: String,
    pub platform: Platform,
    pub device_label: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub expires_at: Timestamp,
    /// `None` while live. Once set the session is permanently dead.
    pub revoked_at: Option<Timestamp>,
    /// Forward pointer to the rotation successor's jti; `None` until rotated.
    pub replaced_by_jti: Option<Uuid>,
    pub created_at: Timestamp,
    pub last_used_at: Timestamp,
}

/// DTO for creating a new session row (chain root or rotation successor).
#[derive(Debug)]
pub struct CreateSession {
    pub jti: Uuid,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub platform: Platform,
    pub device_label: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub expires_at: Timestamp,
}
