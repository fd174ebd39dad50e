//! Shared primitives for the Taskforge backend.
//!
//! - [`types`] -- database id and timestamp aliases used by every crate.
//! - [`error`] -- the domain-level [`error::CoreError`] enum.
//! - [`duration`] -- parser for `15m` / `7d` style duration strings.

pub mod duration;
pub mod error;
pub mod types;
