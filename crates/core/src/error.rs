//! Domain-level error type shared across the workspace.

use crate::types::DbId;

/// Domain errors raised by business logic, independent of the HTTP layer.
///
/// The API crate maps each variant onto an HTTP status in its `AppError`
/// implementation; nothing in here knows about status codes.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup by id came back empty.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a domain validation rule.
    #[error("{0}")]
    Validation(String),

    /// The operation conflicts with existing state (e.g. duplicate email).
    #[error("{0}")]
    Conflict(String),

    /// Authentication failed or the presented credentials/token are invalid.
    #[error("{0}")]
    Unauthorized(String),

    /// The caller is authenticated but not allowed to touch this resource.
    #[error("{0}")]
    Forbidden(String),

    /// An unexpected internal failure; the message is for logs, not clients.
    #[error("{0}")]
    Internal(String),
}
