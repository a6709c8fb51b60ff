use actix_web::{HttpResponse, Responder, web};
use sea_orm::{DatabaseConnection, DbErr};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use super::error_response;
use crate::cache::{RedisCache, keys};
use crate::config::AppConfig;
use crate::db::{portfolio as portfolio_db, services as service_db};
use crate::models::PublicationStatus;
use crate::models::portfolio::{Model as Portfolio, PortfolioDetail};
use crate::models::services::Model as Service;

/// How many records of each kind the home page previews.
pub const HOME_PREVIEW_LIMIT: u64 = 3;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HomeContent {
    pub portfolios: Vec<Portfolio>,
    pub services: Vec<Service>,
}

/// Content for a public page, and whether any part of it fell back to empty.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub content: T,
    pub degraded: bool,
}

/// Use the query result, or empty content when the query failed.
fn or_empty<T: Default>(what: &str, result: Result<T, DbErr>) -> Loaded<T> {
    match result {
        Ok(content) => Loaded {
            content,
            degraded: false,
        },
        Err(e) => {
            warn!("Public read for {what} failed, serving empty content: {e}");
            Loaded {
                content: T::default(),
                degraded: true,
            }
        }
    }
}

/// Serve from cache when possible, otherwise load from the database.
///
/// Degraded loads are served but not cached.
async fn cached_or_load<T, F>(cache: &RedisCache, key: &str, ttl: Duration, load: F) -> T
where
    T: Serialize + DeserializeOwned,
    F: Future<Output = Loaded<T>>,
{
    match cache.get::<T>(key).await {
        Ok(Some(hit)) => return hit,
        Ok(None) => {}
        Err(e) => warn!("Cache error: {e}"),
    }

    let loaded = load.await;
    if !loaded.degraded {
        if let Err(e) = cache.set(key, &loaded.content, ttl).await {
            warn!("Failed to cache {key}: {e}");
        }
    }
    loaded.content
}

/// Load the home page previews. Each list falls back to empty on its own.
pub async fn load_home(db: &DatabaseConnection) -> Loaded<HomeContent> {
    let portfolios = or_empty(
        "home portfolios",
        portfolio_db::list_portfolios(
            db,
            Some(PublicationStatus::Published),
            Some(HOME_PREVIEW_LIMIT),
        )
        .await,
    );
    let services = or_empty(
        "home services",
        service_db::list_services(db, Some(PublicationStatus::Published), Some(HOME_PREVIEW_LIMIT))
            .await,
    );

    Loaded {
        degraded: portfolios.degraded || services.degraded,
        content: HomeContent {
            portfolios: portfolios.content,
            services: services.content,
        },
    }
}

/// GET /api/public/home — first three published portfolios and services.
pub async fn home(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    config: web::Data<AppConfig>,
) -> impl Responder {
    let content = cached_or_load(
        cache.get_ref(),
        &keys::home(),
        config.cache.public_ttl,
        load_home(db.get_ref()),
    )
    .await;
    HttpResponse::Ok().json(content)
}

/// GET /api/public/portfolios — every published portfolio, in display order.
pub async fn portfolios(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    config: web::Data<AppConfig>,
) -> impl Responder {
    let items: Vec<Portfolio> = cached_or_load(
        cache.get_ref(),
        &keys::portfolios(),
        config.cache.public_ttl,
        async {
            or_empty(
                "portfolios",
                portfolio_db::list_portfolios(db.get_ref(), Some(PublicationStatus::Published), None)
                    .await,
            )
        },
    )
    .await;
    HttpResponse::Ok().json(items)
}

/// GET /api/public/services — every published service, in display order.
pub async fn services(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    config: web::Data<AppConfig>,
) -> impl Responder {
    let items: Vec<Service> = cached_or_load(
        cache.get_ref(),
        &keys::services(),
        config.cache.public_ttl,
        async {
            or_empty(
                "services",
                service_db::list_services(db.get_ref(), Some(PublicationStatus::Published), None)
                    .await,
            )
        },
    )
    .await;
    HttpResponse::Ok().json(items)
}

/// GET /api/public/portfolios/{slug} — a single published portfolio.
///
/// Drafts, unknown slugs and lookup failures all answer 404.
pub async fn portfolio_by_slug(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
) -> impl Responder {
    let slug = path.into_inner();
    let cache_key = keys::portfolio(&slug);

    match cache.get::<Portfolio>(&cache_key).await {
        Ok(Some(item)) => return HttpResponse::Ok().json(PortfolioDetail::from(item)),
        Ok(None) => {}
        Err(e) => warn!("Cache error: {e}"),
    }

    match portfolio_db::get_published_by_slug(db.get_ref(), &slug).await {
        Ok(Some(item)) => {
            if let Err(e) = cache.set(&cache_key, &item, config.cache.detail_ttl).await {
                warn!("Failed to cache {cache_key}: {e}");
            }
            HttpResponse::Ok().json(PortfolioDetail::from(item))
        }
        Ok(None) => error_response(
            HttpResponse::NotFound(),
            format!("Portfolio {slug} not found"),
        ),
        Err(e) => {
            warn!("Portfolio lookup for {slug} failed: {e}");
            error_response(
                HttpResponse::NotFound(),
                format!("Portfolio {slug} not found"),
            )
        }
    }
}
