//! Repository-level tests for session rotation and revocation.
//!
//! These exercise the transactional guarantees directly, below the HTTP
//! layer: rotation is all-or-nothing, and of two rotations racing on the
//! same row only one can win.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use taskforge_db::models::session::{CreateSession, Platform};
use taskforge_db::models::user::CreateUser;
use taskforge_db::repositories::{SessionRepo, UserRepo};

/// Insert a user row to own test sessions.
async fn seed_user(pool: &PgPool) -> i64 {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: "owner@test.com".into(),
            password_hash: "$argon2id$placeholder".into(),
        },
    )
    .await
    .expect("user creation should succeed");
    user.id
}

/// Build a session DTO with fresh jti and a one-week expiry.
fn session_input(user_id: i64) -> CreateSession {
    CreateSession {
        jti: Uuid::new_v4(),
        user_id,
        refresh_token_hash: "$argon2id$hash-of-refresh".into(),
        platform: Platform::Mobile,
        device_label: Some("pixel-8".into()),
        user_agent: Some("test-agent".into()),
        ip_address: Some("203.0.113.7".into()),
        expires_at: Utc::now() + Duration::days(7),
    }
}

/// Rotation revokes the old row, links it forward, and inserts the
/// successor with metadata carried over unchanged.
#[sqlx::test]
async fn test_rotate_links_chain(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let root = SessionRepo::create(&pool, &session_input(user_id))
        .await
        .expect("session creation should succeed");

    let successor_input = CreateSession {
        jti: Uuid::new_v4(),
        ..session_input(user_id)
    };
    let successor = SessionRepo::rotate(&pool, root.id, &successor_input)
        .await
        .expect("rotation should succeed")
        .expect("rotation should win on a live session");

    let old = SessionRepo::find_by_jti(&pool, root.jti)
        .await
        .unwrap()
        .unwrap();
    assert!(old.revoked_at.is_some(), "old row must be revoked");
    assert_eq!(old.replaced_by_jti, Some(successor.jti));

    assert!(successor.revoked_at.is_none());
    assert!(successor.replaced_by_jti.is_none());
    assert_eq!(successor.device_label, root.device_label);
    assert_eq!(successor.user_agent, root.user_agent);
    assert_eq!(successor.ip_address, root.ip_address);
    assert_eq!(successor.platform, root.platform);
}

/// A second rotation on an already-rotated row loses: it returns `None`
/// and writes nothing -- no orphan successor appears.
#[sqlx::test]
async fn test_rotate_loser_writes_nothing(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let root = SessionRepo::create(&pool, &session_input(user_id))
        .await
        .unwrap();

    let winner = SessionRepo::rotate(&pool, root.id, &session_input(user_id))
        .await
        .unwrap();
    assert!(winner.is_some());

    let loser = SessionRepo::rotate(&pool, root.id, &session_input(user_id))
        .await
        .unwrap();
    assert!(loser.is_none(), "second rotation on the same row must lose");

    let sessions = SessionRepo::list_for_user(&pool, user_id).await.unwrap();
    assert_eq!(sessions.len(), 2, "the losing rotation must insert nothing");
}

/// `revoke` is terminal: it reports `true` once and `false` afterwards, and
/// never sets a forward pointer.
#[sqlx::test]
async fn test_revoke_is_terminal(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let session = SessionRepo::create(&pool, &session_input(user_id))
        .await
        .unwrap();

    assert!(SessionRepo::revoke(&pool, session.id).await.unwrap());
    assert!(!SessionRepo::revoke(&pool, session.id).await.unwrap());

    let row = SessionRepo::find_by_jti(&pool, session.jti)
        .await
        .unwrap()
        .unwrap();
    assert!(row.revoked_at.is_some());
    assert_eq!(row.replaced_by_jti, None);
}

/// `cleanup_expired` removes revoked and expired rows but leaves live ones.
#[sqlx::test]
async fn test_cleanup_expired(pool: PgPool) {
    let user_id = seed_user(&pool).await;

    let live = SessionRepo::create(&pool, &session_input(user_id))
        .await
        .unwrap();
    let revoked = SessionRepo::create(&pool, &session_input(user_id))
        .await
        .unwrap();
    SessionRepo::revoke(&pool, revoked.id).await.unwrap();
    let expired_input = CreateSession {
        expires_at: Utc::now() - Duration::hours(1),
        ..session_input(user_id)
    };
    SessionRepo::create(&pool, &expired_input).await.unwrap();

    let removed = SessionRepo::cleanup_expired(&pool).await.unwrap();
    assert_eq!(removed, 2);

    let remaining = SessionRepo::list_for_user(&pool, user_id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].jti, live.jti);
}

/// The token epoch bump is an in-database increment returning the new value.
#[sqlx::test]
async fn test_bump_token_version(pool: PgPool) {
    let user_id = seed_user(&pool).await;

    assert_eq!(
        UserRepo::bump_token_version(&pool, user_id).await.unwrap(),
        Some(1)
    );
    assert_eq!(
        UserRepo::bump_token_version(&pool, user_id).await.unwrap(),
        Some(2)
    );
    assert_eq!(
        UserRepo::bump_token_version(&pool, 999_999).await.unwrap(),
        None
    );
}

/// Duplicate jti values violate `uq_sessions_jti`.
#[sqlx::test]
async fn test_jti_unique(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let input = session_input(user_id);

    SessionRepo::create(&pool, &input).await.unwrap();
    let duplicate = SessionRepo::create(&pool, &input).await;
    assert!(duplicate.is_err(), "jti must be globally unique");
}
