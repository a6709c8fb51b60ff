use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::config::AppConfig;
use crate::db::portfolio as portfolio_db;
use crate::models::PublicationStatus;
use crate::sitemap::{build_entries, render_xml};

/// GET /sitemap.xml — every public page plus one URL per published portfolio.
pub async fn sitemap(
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
) -> impl Responder {
    let published =
        match portfolio_db::list_portfolios(db.get_ref(), Some(PublicationStatus::Published), None)
            .await
        {
            Ok(items) => items,
            Err(e) => {
                warn!("Sitemap portfolio query failed, listing static pages only: {e}");
                Vec::new()
            }
        };

    let entries = build_entries(&config.site_url, &published, chrono::Utc::now());
    HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .body(render_xml(&entries))
}
