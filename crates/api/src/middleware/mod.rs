//! Request authentication middleware.
//!
//! - [`auth::AuthUser`] -- extracts and fully validates the authenticated
//!   user + current session from a JWT Bearer token.

pub mod auth;
