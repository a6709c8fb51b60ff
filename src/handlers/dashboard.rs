use actix_web::{HttpResponse, Responder, web};
use sea_orm::{DatabaseConnection, DbErr};
use tracing::warn;

use crate::auth::middleware::AuthenticatedAdmin;
use crate::db::{portfolio as portfolio_db, services as service_db};
use crate::models::{DashboardStats, KindStats};

fn counts_or_zero(kind: &str, result: Result<KindStats, DbErr>) -> KindStats {
    result.unwrap_or_else(|e| {
        warn!("Failed to count {kind}, showing zero: {e}");
        KindStats::default()
    })
}

/// Dashboard counts. A kind whose count query fails shows zeros; the other is unaffected.
pub async fn load_stats(db: &DatabaseConnection) -> DashboardStats {
    let portfolios = counts_or_zero("portfolios", portfolio_db::count_by_status(db).await);
    let services = counts_or_zero("services", service_db::count_by_status(db).await);
    DashboardStats::new(portfolios, services)
}

/// GET /api/admin/stats — totals, published and draft counts per record kind.
pub async fn stats(
    _admin: AuthenticatedAdmin,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    HttpResponse::Ok().json(load_stats(db.get_ref()).await)
}
