//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register       -> register
/// POST /login          -> login
/// POST /refresh        -> refresh
/// POST /logout         -> logout (requires auth)
/// POST /logout-device  -> logout_device (requires auth)
/// POST /revoke         -> revoke_all (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/logout-device", post(auth::logout_device))
        .route("/revoke", post(auth::revoke_all))
}
