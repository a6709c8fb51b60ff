///! Integration tests for admin token validation.
///!
///! Tokens are minted locally with HS256 and the same shared secret the
///! validator is configured with, so neither Supabase nor a database is needed.
///!
///! Run with: `cargo test --test auth_test`
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use showcase_backend::auth::SessionError;
use showcase_backend::auth::jwks::JwksCache;
use showcase_backend::auth::jwt::{Claims, UserMetadata, validate_token};
use showcase_backend::auth::middleware::AdminSession;
use showcase_backend::config::SupabaseConfig;

const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

fn supabase_config(secret: Option<&str>) -> SupabaseConfig {
    SupabaseConfig::new(
        "https://example.supabase.co",
        "anon-key".to_string(),
        "portfolio-images".to_string(),
    )
    .expect("valid Supabase URL")
    .with_jwt_secret(secret.map(str::to_string))
}

fn claims_for(sub: &str, exp: usize) -> Claims {
    Claims {
        sub: sub.to_string(),
        exp,
        iat: Some(Utc::now().timestamp() as usize),
        iss: Some("https://example.supabase.co/auth/v1".to_string()),
        email: Some("admin@example.com".to_string()),
        role: Some("authenticated".to_string()),
        user_metadata: Some(UserMetadata {
            full_name: Some("Site Admin".to_string()),
            name: None,
            email: Some("admin@example.com".to_string()),
        }),
    }
}

fn mint(claims: &Claims, secret: &str) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to encode test JWT")
}

#[tokio::test]
async fn test_valid_token_decodes_correctly() {
    let user_id = Uuid::new_v4();
    let exp = Utc::now().timestamp() as usize + 3600;
    let token = mint(&claims_for(&user_id.to_string(), exp), TEST_SECRET);
    let cache = JwksCache::new(&supabase_config(Some(TEST_SECRET)));

    let claims = validate_token(&token, &cache)
        .await
        .expect("Token should be valid");

    assert_eq!(claims.user_id().unwrap(), user_id);
    assert_eq!(claims.user_email().as_deref(), Some("admin@example.com"));
    assert_eq!(claims.display_name().as_deref(), Some("Site Admin"));
    assert_eq!(claims.expires_at().unwrap().timestamp(), exp as i64);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    // Well past the 60s default leeway.
    let exp = Utc::now().timestamp() as usize - 300;
    let token = mint(&claims_for(&Uuid::new_v4().to_string(), exp), TEST_SECRET);
    let cache = JwksCache::new(&supabase_config(Some(TEST_SECRET)));

    let err = validate_token(&token, &cache).await.unwrap_err();
    assert!(
        err.to_string().contains("ExpiredSignature"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_wrong_secret_is_rejected() {
    let exp = Utc::now().timestamp() as usize + 3600;
    let token = mint(
        &claims_for(&Uuid::new_v4().to_string(), exp),
        "some-other-secret-that-is-also-quite-long-xxxxxxxxxx",
    );
    let cache = JwksCache::new(&supabase_config(Some(TEST_SECRET)));

    let err = validate_token(&token, &cache).await.unwrap_err();
    assert!(
        err.to_string().contains("InvalidSignature"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_hs256_rejected_without_shared_secret() {
    let exp = Utc::now().timestamp() as usize + 3600;
    let token = mint(&claims_for(&Uuid::new_v4().to_string(), exp), TEST_SECRET);
    let cache = JwksCache::new(&supabase_config(None));

    let err = validate_token(&token, &cache).await.unwrap_err();
    assert!(matches!(err, SessionError::InvalidToken(_)));
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let cache = JwksCache::new(&supabase_config(Some(TEST_SECRET)));
    let err = validate_token("not.a.jwt", &cache).await.unwrap_err();
    assert!(matches!(err, SessionError::InvalidToken(_)));
}

#[test]
fn test_non_uuid_sub_is_an_error() {
    let claims = claims_for("not-a-uuid", 0);
    assert!(claims.user_id().is_err());
}

#[test]
fn test_display_name_falls_back_to_name() {
    let mut claims = claims_for(&Uuid::new_v4().to_string(), 0);
    claims.email = None;
    claims.user_metadata = Some(UserMetadata {
        full_name: None,
        name: Some("admin".to_string()),
        email: Some("meta@example.com".to_string()),
    });

    assert_eq!(claims.display_name().as_deref(), Some("admin"));
    assert_eq!(claims.user_email().as_deref(), Some("meta@example.com"));
}

#[test]
fn test_admin_session_from_claims() {
    let user_id = Uuid::new_v4();
    let exp = Utc::now().timestamp() as usize + 3600;
    let claims = claims_for(&user_id.to_string(), exp);

    let session = AdminSession::from_claims(&claims, "token").unwrap();
    assert_eq!(session.user_id, user_id);
    assert_eq!(session.email.as_deref(), Some("admin@example.com"));
    assert_eq!(session.display_name.as_deref(), Some("Site Admin"));
}
