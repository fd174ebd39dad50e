//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers stay thin: auth handlers delegate to the session lifecycle
//! engine, CRUD handlers delegate to the corresponding repository in
//! `taskforge_db` and map errors via `AppError`.

pub mod auth;
pub mod categories;
pub mod tasks;
pub mod users;
