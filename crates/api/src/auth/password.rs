//! Argon2id hashing for passwords and refresh tokens.
//!
//! All hashes use the Argon2id variant with a cryptographically random salt
//! generated via [`OsRng`], stored in PHC string format so algorithm
//! parameters and salt travel with the hash. Refresh tokens go through the
//! same primitive as passwords: the cost is deliberate and must stay on the
//! verification path.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (includes algorithm, params, salt,
/// and hash).
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default(); // Argon2id with default params
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted Argon2id hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Hash the exact refresh-token string issued to a client.
///
/// Only this hash is persisted; a database leak does not yield usable
/// refresh tokens.
pub fn hash_refresh_token(token: &str) -> Result<String, argon2::password_hash::Error> {
    hash_password(token)
}

/// Verify a presented refresh-token string against the stored hash.
pub fn verify_refresh_token(token: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    verify_password(token, hash)
}

/// Validate that a password meets the minimum length requirement.
///
/// Returns `Ok(())` when acceptable, or `Err` with a human-readable
/// explanation.
pub fn validate_password_strength(password: &str) -> Result<(), String> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    Ok(())
}
