//! HS256 token codec for access and refresh tokens.
//!
//! Both token kinds are JWTs signed with the same shared secret and carrying
//! the same [`Claims`] shape `{ sub, token_version, jti }`; only the expiry
//! policy differs (short for access, long for refresh). Tokens are opaque
//! bearer strings to clients -- no client-side parsing contract exists beyond
//! "send it back verbatim".

use chrono::Duration;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use taskforge_core::duration::parse_duration;
use taskforge_core::types::DbId;
use uuid::Uuid;

/// Claims embedded in every token, access and refresh alike.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// The user's token epoch at signing time. A mismatch with the current
    /// value means a global revoke happened after this token was minted.
    pub token_version: i32,
    /// Public identifier of the session this token belongs to.
    pub jti: Uuid,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Configuration for token signing and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify both token kinds.
    pub secret: String,
    /// Access token lifetime (default: 15 minutes).
    pub access_expiry: Duration,
    /// Refresh token lifetime (default: 7 days).
    pub refresh_expiry: Duration,
}

/// Default access token expiry.
const DEFAULT_ACCESS_EXPIRY: &str = "15m";
/// Default refresh token expiry.
const DEFAULT_REFRESH_EXPIRY: &str = "7d";

impl JwtConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var              | Required | Default |
    /// |----------------------|----------|---------|
    /// | `JWT_SECRET`         | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY`  | no       | `15m`   |
    /// | `JWT_REFRESH_EXPIRY` | no       | `7d`    |
    ///
    /// Expiries use the `<integer><s|m|h|d>` format.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is unset/empty or an expiry is malformed.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_expiry = parse_duration(
            &std::env::var("JWT_ACCESS_EXPIRY").unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY.into()),
        )
        .expect("JWT_ACCESS_EXPIRY must be a valid duration");

        let refresh_expiry = parse_duration(
            &std::env::var("JWT_REFRESH_EXPIRY").unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY.into()),
        )
        .expect("JWT_REFRESH_EXPIRY must be a valid duration");

        Self {
            secret,
            access_expiry,
            refresh_expiry,
        }
    }
}

/// Sign an access token for the given user and session.
pub fn sign_access_token(
    user_id: DbId,
    token_version: i32,
    jti: Uuid,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    sign(user_id, token_version, jti, config.access_expiry, config)
}

/// Sign a refresh token for the given user and session.
pub fn sign_refresh_token(
    user_id: DbId,
    token_version: i32,
    jti: Uuid,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    sign(user_id, token_version, jti, config.refresh_expiry, config)
}

fn sign(
    user_id: DbId,
    token_version: i32,
    jti: Uuid,
    expiry: Duration,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        token_version,
        jti,
        exp: now + expiry.num_seconds(),
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically; malformed input,
/// a wrong signature, and an expired token all fail here.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a test config with a known secret.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_expiry: Duration::minutes(15),
            refresh_expiry: Duration::days(7),
        }
    }

    #[test]
    fn test_sign_and_validate_access_token() {
        let config = test_config();
        let jti = Uuid::new_v4();
        let token =
            sign_access_token(42, 3, jti, &config).expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.token_version, 3);
        assert_eq!(claims.jti, jti);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_token_outlives_access_token() {
        let config = test_config();
        let jti = Uuid::new_v4();
        let access = sign_access_token(1, 0, jti, &config).expect("sign should succeed");
        let refresh = sign_refresh_token(1, 0, jti, &config).expect("sign should succeed");

        let access_claims = validate_token(&access, &config).expect("validate should succeed");
        let refresh_claims = validate_token(&refresh, &config).expect("validate should succeed");
        assert!(
            refresh_claims.exp > access_claims.exp,
            "refresh expiry must be longer than access expiry"
        );
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();

        // Manually create an already-expired token.
        // Use a margin well beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            token_version: 0,
            jti: Uuid::new_v4(),
            exp: now - 300, // expired 5 minutes ago (well past leeway)
            iat: now - 600,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        let result = validate_token(&token, &config);
        assert!(result.is_err(), "expired token must fail validation");
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = JwtConfig {
            secret: "secret-alpha".to_string(),
            ..test_config()
        };
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            ..test_config()
        };

        let token = sign_access_token(1, 0, Uuid::new_v4(), &config_a)
            .expect("token generation should succeed");

        let result = validate_token(&token, &config_b);
        assert!(
            result.is_err(),
            "token signed with a different secret must fail"
        );
    }

    #[test]
    fn test_garbage_token_fails() {
        let config = test_config();
        assert!(validate_token("not-a-jwt", &config).is_err());
    }
}
