///! Route-level tests: the admin guard and the sitemap endpoint.
///!
///! Run with: `cargo test --test http_test`
use actix_web::{App, http::StatusCode, test, web};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
use std::sync::Arc;
use uuid::Uuid;

use showcase_backend::auth::jwks::JwksCache;
use showcase_backend::auth::jwt::Claims;
use showcase_backend::config::{AppConfig, CacheConfig, SupabaseConfig};
use showcase_backend::handlers;
use showcase_backend::models::{PublicationStatus, portfolio};

const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

fn supabase() -> SupabaseConfig {
    SupabaseConfig::new(
        "https://example.supabase.co",
        "anon".to_string(),
        "portfolio-images".to_string(),
    )
    .unwrap()
    .with_jwt_secret(Some(TEST_SECRET.to_string()))
}

fn app_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://unused".to_string(),
        redis_url: "redis://unused".to_string(),
        supabase: supabase(),
        site_url: "https://studio.dev".to_string(),
        port: 8080,
        allowed_origin: None,
        cache: CacheConfig::default(),
    }
}

fn admin_token(user_id: Uuid) -> String {
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + 3600,
        iat: Some(now),
        iss: None,
        email: Some("admin@example.com".to_string()),
        role: Some("authenticated".to_string()),
        user_metadata: None,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

fn published(slug: &str) -> portfolio::Model {
    let now = Utc::now();
    portfolio::Model {
        id: Uuid::new_v4(),
        title: slug.to_string(),
        slug: slug.to_string(),
        description: None,
        tech_stack: Vec::new(),
        featured_image: None,
        gallery_images: Vec::new(),
        live_url: None,
        github_url: None,
        order_index: 0,
        status: PublicationStatus::Published,
        created_at: now,
        updated_at: now,
    }
}

#[actix_web::test]
async fn test_session_requires_bearer_token() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(Arc::new(JwksCache::new(&supabase()))))
            .route("/session", web::get().to(handlers::auth::session)),
    )
    .await;

    let req = test::TestRequest::get().uri("/session").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/session")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_session_returns_admin_for_valid_token() {
    let user_id = Uuid::new_v4();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(Arc::new(JwksCache::new(&supabase()))))
            .route("/session", web::get().to(handlers::auth::session)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/session")
        .insert_header(("Authorization", format!("Bearer {}", admin_token(user_id))))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["user_id"], user_id.to_string());
    assert_eq!(body["email"], "admin@example.com");
    assert!(body.get("access_token").is_none());
}

#[actix_web::test]
async fn test_sitemap_lists_published_portfolios() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![published("harbor")]])
        .into_connection();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(db))
            .app_data(web::Data::new(app_config()))
            .route("/sitemap.xml", web::get().to(handlers::sitemap::sitemap)),
    )
    .await;

    let req = test::TestRequest::get().uri("/sitemap.xml").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("application/xml"));

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("<loc>https://studio.dev/portfolio/harbor</loc>"));
    assert_eq!(body.matches("<url>").count(), 7);
}

#[actix_web::test]
async fn test_sitemap_falls_back_to_static_pages() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection reset".to_string())])
        .into_connection();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(db))
            .app_data(web::Data::new(app_config()))
            .route("/sitemap.xml", web::get().to(handlers::sitemap::sitemap)),
    )
    .await;

    let req = test::TestRequest::get().uri("/sitemap.xml").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = String::from_utf8(body.to_vec()).unwrap();

    assert_eq!(body.matches("<url>").count(), 6);
    assert!(!body.contains("/portfolio/"));
}
