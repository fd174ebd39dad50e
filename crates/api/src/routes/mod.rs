pub mod auth;
pub mod categories;
pub mod health;
pub mod tasks;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register         register (public)
/// /auth/login            login (public)
/// /auth/refresh          refresh (public)
/// /auth/logout           logout current session (requires auth)
/// /auth/logout-device    logout another session by jti (requires auth)
/// /auth/revoke           global revoke (requires auth)
///
/// /users/me              own user projection
///
/// /categories            list, create
/// /categories/{id}       get, update, delete
///
/// /tasks                 list, create
/// /tasks/stats           per-status counts
/// /tasks/{id}            get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/categories", categories::router())
        .nest("/tasks", tasks::router())
}
