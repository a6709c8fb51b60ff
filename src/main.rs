use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use migration::{Migrator, MigratorTrait};
use showcase_backend::auth::jwks::JwksCache;
use showcase_backend::auth::session::SessionClient;
use showcase_backend::cache::RedisCache;
use showcase_backend::config::AppConfig;
use showcase_backend::create_pool;
use showcase_backend::handlers;
use showcase_backend::ordering::ReorderRegistry;
use showcase_backend::storage::StorageClient;
use std::io::{Error, ErrorKind};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::from_env().map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;

    let db = create_pool(&config.database_url)
        .await
        .map_err(|e| Error::other(format!("Failed to connect to database: {e}")))?;
    Migrator::up(&db, None)
        .await
        .map_err(|e| Error::other(format!("Failed to run migrations: {e}")))?;
    let db_data = web::Data::new(db);

    let redis_cache = RedisCache::new(&config.redis_url)
        .await
        .map_err(|e| Error::other(format!("Failed to connect to Redis: {e}")))?;
    let redis_data = web::Data::new(Arc::new(redis_cache));
    tracing::info!("Connected to Redis");

    tracing::info!(project = %config.supabase.project_ref, "Using Supabase project");
    let jwks_cache = web::Data::new(Arc::new(JwksCache::new(&config.supabase)));
    let sessions = web::Data::new(SessionClient::new(&config.supabase));
    let storage = web::Data::new(StorageClient::new(&config.supabase));

    // Saving indicators for drag-to-reorder, one per record kind.
    let reorder_registry = web::Data::new(ReorderRegistry::new());

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let allowed_origin = config.allowed_origin.clone();
    let config_data = web::Data::new(config);
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = match &allowed_origin {
            Some(origin) => Cors::default().allowed_origin(origin),
            None => Cors::default().allow_any_origin(),
        }
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::AUTHORIZATION,
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::ACCEPT,
        ])
        .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(redis_data.clone())
            .app_data(jwks_cache.clone())
            .app_data(sessions.clone())
            .app_data(storage.clone())
            .app_data(reorder_registry.clone())
            .app_data(config_data.clone())
            .app_data(web::PayloadConfig::new(10 * 1024 * 1024))
            .route("/sitemap.xml", web::get().to(handlers::sitemap::sitemap))
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
