//! Authentication primitives and the session lifecycle engine.
//!
//! - [`password`] -- Argon2id hashing for passwords and refresh tokens.
//! - [`tokens`] -- HS256 token codec for access and refresh tokens.
//! - [`lifecycle`] -- register / login / refresh-with-rotation / logout /
//!   revoke-all orchestration.

pub mod lifecycle;
pub mod password;
pub mod tokens;
