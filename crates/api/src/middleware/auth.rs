//! JWT-based authentication extractor for Axum handlers.
//!
//! Signature validity alone is not enough to pass: the token's epoch must
//! match the user's current `token_version` (global revoke) and the session
//! named by its `jti` must still be live (logout / rotation supersede).

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::Utc;
use taskforge_core::error::CoreError;
use taskforge_db::models::user::User;
use taskforge_db::repositories::{SessionRepo, UserRepo};
use uuid::Uuid;

use crate::auth::tokens::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// Carries the full user row plus the `jti` of the session the token was
/// issued for, so logout can target the caller's current session without the
/// client resending it.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
    pub jti: Uuid,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        // 1. Signature + expiry.
        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        // 2. The subject must still exist (a deleted account can hold a
        //    cryptographically valid token).
        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User not found".into())))?;

        // 3. Global-revoke epoch check.
        if claims.token_version != user.token_version {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Token has been revoked".into(),
            )));
        }

        // 4. The session must exist and be live.
        let session = SessionRepo::find_by_jti(&state.pool, claims.jti)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Session not found".into())))?;

        if session.revoked_at.is_some() {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Session has been logged out".into(),
            )));
        }
        if session.expires_at <= Utc::now() {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Session has expired".into(),
            )));
        }

        Ok(AuthUser {
            user,
            jti: claims.jti,
        })
    }
}
