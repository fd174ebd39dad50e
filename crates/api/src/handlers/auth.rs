//! Handlers for the `/auth` resource.
//!
//! All session/token semantics live in [`crate::auth::lifecycle`]; these
//! handlers only translate between HTTP and the engine.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use taskforge_core::error::CoreError;
use taskforge_core::types::DbId;
use taskforge_db::models::session::Platform;
use taskforge_db::models::user::UserResponse;
use uuid::Uuid;
use validator::Validate;

use crate::auth::lifecycle::{self, SessionMeta};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub platform: Platform,
    pub device_label: Option<String>,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for `POST /auth/logout-device`.
#[derive(Debug, Deserialize)]
pub struct LogoutDeviceRequest {
    pub jti: Uuid,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserInfo,
}

/// Successful refresh response.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Minimal user projection embedded in [`LoginResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a new account. Returns 201 with the public user projection.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let user = lifecycle::register(&state, &input.email, &input.password).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password, opening a new session chain.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let meta = SessionMeta {
        platform: input.platform,
        device_label: input.device_label,
        user_agent: header_value(&headers, "user-agent"),
        ip_address: header_value(&headers, "x-forwarded-for"),
    };

    let outcome = lifecycle::login(&state, &input.email, &input.password, meta).await?;

    Ok(Json(LoginResponse {
        access_token: outcome.tokens.access_token,
        refresh_token: outcome.tokens.refresh_token,
        user: UserInfo {
            id: outcome.user.id,
            email: outcome.user.email,
        },
    }))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a live refresh token for a new pair, rotating the session.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<RefreshResponse>> {
    let tokens = lifecycle::refresh(&state, &input.refresh_token).await?;

    Ok(Json(RefreshResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    }))
}

/// POST /api/v1/auth/logout
///
/// Revoke the caller's current session (the jti comes from the access token,
/// not the body).
pub async fn logout(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    lifecycle::logout(&state, auth.user.id, auth.jti).await?;

    Ok(Json(MessageResponse {
        message: "Logged out",
    }))
}

/// POST /api/v1/auth/logout-device
///
/// Revoke one of the caller's other sessions by its jti.
pub async fn logout_device(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<LogoutDeviceRequest>,
) -> AppResult<Json<MessageResponse>> {
    lifecycle::logout_device(&state, auth.user.id, input.jti).await?;

    Ok(Json(MessageResponse {
        message: "Device logged out",
    }))
}

/// POST /api/v1/auth/revoke
///
/// Invalidate every outstanding token for the caller (global revoke).
pub async fn revoke_all(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    lifecycle::revoke_all(&state, auth.user.id).await?;

    Ok(Json(MessageResponse {
        message: "All sessions revoked",
    }))
}

/// Read an optional header as an owned string.
fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}
