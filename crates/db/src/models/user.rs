//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use taskforge_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash and token epoch -- NEVER serialize this to API
/// responses directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    /// Stored lowercase-normalized; uniqueness is enforced on the
    /// normalized form (`uq_users_email`).
    pub email: String,
    pub password_hash: String,
    /// Per-user revocation epoch. A token whose embedded version differs
    /// from this value is dead, regardless of session state.
    pub token_version: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash, no epoch).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user. The email must already be normalized and the
/// password already hashed by the caller.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
}
