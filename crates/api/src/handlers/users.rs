//! Handlers for the `/users` resource.

use axum::Json;
use taskforge_db::models::user::UserResponse;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;

/// GET /api/v1/users/me
///
/// The authenticated user's own projection (no password hash, no token
/// epoch).
pub async fn me(auth: AuthUser) -> AppResult<Json<UserResponse>> {
    Ok(Json(auth.user.into()))
}
