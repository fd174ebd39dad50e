//! Session lifecycle engine.
//!
//! Orchestrates registration, login, refresh-with-rotation, logout (self and
//! other-device), and global revoke on top of the user/session repositories
//! and the token codec. This is the only place session rows are created or
//! revoked.
//!
//! Failure semantics worth knowing:
//!
//! - Login failures are deliberately indistinguishable between "no such
//!   email" and "wrong password" (anti-enumeration).
//! - Presenting an already-rotated-away refresh token is reuse detection: it
//!   fails hard with 401 and revokes nothing else. Escalating a replayed
//!   token into chain-wide revocation would let anyone holding a leaked
//!   stale token log the victim out at will.
//! - Global revoke bumps the user's token epoch and never touches session
//!   rows; every outstanding token dies on its next authenticated request.

use chrono::Utc;
use taskforge_core::error::CoreError;
use taskforge_core::types::DbId;
use taskforge_db::models::session::{CreateSession, Platform};
use taskforge_db::models::user::{CreateUser, User, UserResponse};
use taskforge_db::repositories::{CategoryRepo, SessionRepo, UserRepo};
use uuid::Uuid;

use crate::auth::password::{
    hash_password, hash_refresh_token, validate_password_strength, verify_password,
    verify_refresh_token,
};
use crate::auth::tokens::{sign_access_token, sign_refresh_token, validate_token};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Client-visible message for any login credential failure.
const BAD_CREDENTIALS: &str = "Invalid email or password";

/// Client-visible message for any refresh-token verification failure.
const BAD_REFRESH: &str = "Invalid or expired refresh token";

/// Device metadata captured at login and carried forward unchanged across
/// every rotation of the chain.
#[derive(Debug, Clone)]
pub struct SessionMeta {
    pub platform: Platform,
    pub device_label: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

/// Tokens issued for one session step.
#[derive(Debug)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Successful login outcome: tokens plus the authenticated user.
#[derive(Debug)]
pub struct LoginOutcome {
    pub tokens: TokenPair,
    pub user: User,
}

/// Create a new account.
///
/// Fails with `Conflict` if the normalized email is already taken. Default
/// categories are seeded best-effort: a failure there is logged and
/// swallowed, never surfaced to the caller.
pub async fn register(state: &AppState, email: &str, password: &str) -> AppResult<UserResponse> {
    let email = normalize_email(email);

    validate_password_strength(password).map_err(CoreError::Validation)?;

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            password_hash,
        },
    )
    .await?;

    // Best-effort: a user without default categories is still a valid user.
    if let Err(e) = CategoryRepo::create_defaults(&state.pool, user.id).await {
        tracing::warn!(user_id = user.id, error = %e, "Failed to seed default categories");
    }

    tracing::info!(user_id = user.id, "User registered");

    Ok(user.into())
}

/// Authenticate with email + password and open a new session chain.
///
/// This is the only operation that creates a session without revoking a
/// predecessor.
pub async fn login(
    state: &AppState,
    email: &str,
    password: &str,
    meta: SessionMeta,
) -> AppResult<LoginOutcome> {
    let email = normalize_email(email);

    // Identical failure for unknown email and wrong password.
    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(BAD_CREDENTIALS.into())))?;

    let password_valid = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            BAD_CREDENTIALS.into(),
        )));
    }

    let jti = Uuid::new_v4();
    let refresh_token = sign_refresh_token(user.id, user.token_version, jti, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token signing error: {e}")))?;
    let refresh_token_hash = hash_refresh_token(&refresh_token)
        .map_err(|e| AppError::InternalError(format!("Refresh token hashing error: {e}")))?;

    let session = SessionRepo::create(
        &state.pool,
        &CreateSession {
            jti,
            user_id: user.id,
            refresh_token_hash,
            platform: meta.platform,
            device_label: meta.device_label,
            user_agent: meta.user_agent,
            ip_address: meta.ip_address,
            expires_at: Utc::now() + state.config.jwt.refresh_expiry,
        },
    )
    .await?;

    let access_token = sign_access_token(user.id, user.token_version, jti, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token signing error: {e}")))?;

    tracing::info!(user_id = user.id, jti = %session.jti, "Login succeeded");

    Ok(LoginOutcome {
        tokens: TokenPair {
            access_token,
            refresh_token,
        },
        user,
    })
}

/// Exchange a live refresh token for a new token pair, rotating the session.
///
/// Every verification failure is a 401; the check order matters and each
/// step is commented with what it defends against.
pub async fn refresh(state: &AppState, refresh_token: &str) -> AppResult<TokenPair> {
    // 1. Signature + expiry. Malformed, forged, and expired tokens die here.
    let claims = validate_token(refresh_token, &state.config.jwt)
        .map_err(|_| AppError::Core(CoreError::Unauthorized(BAD_REFRESH.into())))?;

    // 2. The session this token was issued for must exist.
    let session = SessionRepo::find_by_jti(&state.pool, claims.jti)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(BAD_REFRESH.into())))?;

    // 3. Reuse detection: a revoked session means this token was already
    //    rotated away (or logged out). Hard failure, no cascade.
    if session.revoked_at.is_some() {
        tracing::warn!(
            user_id = session.user_id,
            jti = %session.jti,
            "Refresh token replay on a revoked session"
        );
        return Err(AppError::Core(CoreError::Unauthorized(
            "Refresh token has been revoked".into(),
        )));
    }

    // 4. Store-side expiry, independent of the JWT exp claim.
    if session.expires_at <= Utc::now() {
        return Err(AppError::Core(CoreError::Unauthorized(BAD_REFRESH.into())));
    }

    // 5. The presented string must be the exact one issued for this step.
    //    Defends against a token signed with a leaked secret that carries a
    //    valid live jti but was never issued by us.
    let hash_matches = verify_refresh_token(refresh_token, &session.refresh_token_hash)
        .map_err(|e| AppError::InternalError(format!("Refresh token verification error: {e}")))?;
    if !hash_matches {
        return Err(AppError::Core(CoreError::Unauthorized(BAD_REFRESH.into())));
    }

    // 6. Global-revoke check against the owning user's current epoch.
    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(BAD_REFRESH.into())))?;
    if claims.token_version != user.token_version {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Token has been revoked".into(),
        )));
    }

    // 7. Rotation: revoke the current step and insert its successor in one
    //    transaction, carrying the device metadata forward unchanged.
    let new_jti = Uuid::new_v4();
    let new_refresh = sign_refresh_token(user.id, user.token_version, new_jti, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token signing error: {e}")))?;
    let new_hash = hash_refresh_token(&new_refresh)
        .map_err(|e| AppError::InternalError(format!("Refresh token hashing error: {e}")))?;

    let successor = CreateSession {
        jti: new_jti,
        user_id: session.user_id,
        refresh_token_hash: new_hash,
        platform: session.platform,
        device_label: session.device_label.clone(),
        user_agent: session.user_agent.clone(),
        ip_address: session.ip_address.clone(),
        expires_at: Utc::now() + state.config.jwt.refresh_expiry,
    };

    let rotated = SessionRepo::rotate(&state.pool, session.id, &successor).await?;
    if rotated.is_none() {
        // A concurrent refresh on the same jti won the race; this caller
        // observes the session as revoked, same as a replay.
        return Err(AppError::Core(CoreError::Unauthorized(
            "Refresh token has been revoked".into(),
        )));
    }

    let access_token = sign_access_token(user.id, user.token_version, new_jti, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token signing error: {e}")))?;

    tracing::info!(user_id = user.id, old_jti = %session.jti, new_jti = %new_jti, "Session rotated");

    Ok(TokenPair {
        access_token,
        refresh_token: new_refresh,
    })
}

/// Terminally revoke the caller's current session.
///
/// Rejects a second logout on the same session with 400: a client replaying
/// logout is confused and should hear about it. Contrast [`logout_device`].
pub async fn logout(state: &AppState, user_id: DbId, jti: Uuid) -> AppResult<()> {
    let session = SessionRepo::find_by_jti(&state.pool, jti)
        .await?
        .ok_or_else(|| AppError::BadRequest("Session not found".into()))?;

    if session.user_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot log out another user's session".into(),
        )));
    }

    if session.revoked_at.is_some() {
        return Err(AppError::BadRequest("Session is already logged out".into()));
    }

    SessionRepo::revoke(&state.pool, session.id).await?;
    tracing::info!(user_id, %jti, "Session logged out");
    Ok(())
}

/// Revoke one of the caller's other sessions by its jti.
///
/// Unlike [`logout`], an already-revoked target is a no-op success: this is
/// a device-management sweep where "already gone" is the desired end state.
pub async fn logout_device(state: &AppState, caller_user_id: DbId, target_jti: Uuid) -> AppResult<()> {
    let session = SessionRepo::find_by_jti(&state.pool, target_jti)
        .await?
        .ok_or_else(|| AppError::BadRequest("Session not found".into()))?;

    if session.user_id != caller_user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot log out another user's session".into(),
        )));
    }

    if session.revoked_at.is_none() {
        SessionRepo::revoke(&state.pool, session.id).await?;
        tracing::info!(user_id = caller_user_id, jti = %target_jti, "Device session logged out");
    }
    Ok(())
}

/// Global kill switch: bump the user's token epoch by exactly one.
///
/// Session rows are untouched; every previously issued token (access or
/// refresh) fails its next version check. Cheaper than revoking each session
/// and immune to the size of the session set.
pub async fn revoke_all(state: &AppState, user_id: DbId) -> AppResult<()> {
    let new_version = UserRepo::bump_token_version(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    tracing::info!(user_id, new_version, "All tokens revoked");
    Ok(())
}

/// Lowercase-normalize an email for storage and lookup.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::normalize_email;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  A@X.Com "), "a@x.com");
        assert_eq!(normalize_email("already@lower.case"), "already@lower.case");
    }
}
