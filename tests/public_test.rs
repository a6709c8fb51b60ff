///! Public home previews and dashboard counts when part of the data is unavailable.
///!
///! Run with: `cargo test --test public_test`
use chrono::Utc;
use pretty_assertions::assert_eq;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

use showcase_backend::handlers::dashboard::load_stats;
use showcase_backend::handlers::public::load_home;
use showcase_backend::models::{KindStats, PublicationStatus, portfolio, services};

fn published_portfolio(slug: &str) -> portfolio::Model {
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

fn published_service(title: &str) -> services::Model {
    let now = Utc::now();
    services::Model {
        id: Uuid::new_v4(),
        title: title.to_string(),
        short_description: None,
        description: None,
        icon: None,
        order_index: 0,
        status: PublicationStatus::Published,
        created_at: now,
        updated_at: now,
    }
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::from(n))])
}

#[tokio::test]
async fn test_home_keeps_portfolios_when_services_fail() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![published_portfolio("harbor")]])
        .append_query_errors([DbErr::Custom("services down".to_string())])
        .into_connection();

    let loaded = load_home(&db).await;

    assert_eq!(loaded.content.portfolios.len(), 1);
    assert_eq!(loaded.content.portfolios[0].slug, "harbor");
    assert!(loaded.content.services.is_empty());
    assert!(loaded.degraded);
}

#[tokio::test]
async fn test_home_keeps_services_when_portfolios_fail() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("portfolios down".to_string())])
        .append_query_results([vec![published_service("Consulting")]])
        .into_connection();

    let loaded = load_home(&db).await;

    assert!(loaded.content.portfolios.is_empty());
    assert_eq!(loaded.content.services.len(), 1);
    assert!(loaded.degraded);
}

#[tokio::test]
async fn test_home_complete_load_is_not_degraded() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![published_portfolio("harbor")]])
        .append_query_results([vec![published_service("Consulting")]])
        .into_connection();

    let loaded = load_home(&db).await;
    assert!(!loaded.degraded);
}

#[tokio::test]
async fn test_stats_keep_portfolio_counts_when_services_fail() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(3)]])
        .append_query_results([vec![count_row(1)]])
        .append_query_errors([DbErr::Custom("services down".to_string())])
        .into_connection();

    let stats = load_stats(&db).await;

    assert_eq!(
        stats.portfolios,
        KindStats {
            total: 4,
            published: 3,
            draft: 1,
        }
    );
    assert_eq!(stats.services, KindStats::default());
    assert_eq!(stats.draft_items, 1);
}

#[tokio::test]
async fn test_stats_keep_service_counts_when_portfolios_fail() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("portfolios down".to_string())])
        .append_query_results([vec![count_row(2)]])
        .append_query_results([vec![count_row(5)]])
        .into_connection();

    let stats = load_stats(&db).await;

    assert_eq!(stats.portfolios, KindStats::default());
    assert_eq!(stats.services.total, 7);
    assert_eq!(stats.draft_items, 5);
}
