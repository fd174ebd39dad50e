//! Shared response envelope types for API handlers.
//!
//! All collection/entity responses use a `{ "data": ... }` envelope; simple
//! acknowledgements use `{ "message": ... }`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Standard `{ "message": ... }` acknowledgement for mutations with no
/// meaningful payload (logout, revoke).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
