use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use super::{error_response, write_error};
use crate::auth::middleware::AuthenticatedAdmin;
use crate::cache::RedisCache;
use crate::db::portfolio as portfolio_db;
use crate::models::portfolio::{CreatePortfolio, UpdatePortfolio};
use crate::models::{ListQuery, RecordKind, ReorderRequest, UpdateStatus};
use crate::ordering::ReorderRegistry;
use crate::ordering::store::SeaOrmOrderStore;

/// GET /api/admin/portfolios — every portfolio item in display order, drafts included.
/// Query params: ?status=draft&limit=10
pub async fn get_portfolios(
    _admin: AuthenticatedAdmin,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    match portfolio_db::list_portfolios(db.get_ref(), query.status, query.limit).await {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(e) => error_response(
            HttpResponse::InternalServerError(),
            format!("Failed to fetch portfolios: {e}"),
        ),
    }
}

/// GET /api/admin/portfolios/{id} — a single portfolio item.
pub async fn get_portfolio(
    _admin: AuthenticatedAdmin,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match portfolio_db::get_portfolio_by_id(db.get_ref(), id).await {
        Ok(Some(item)) => HttpResponse::Ok().json(item),
        Ok(None) => error_response(
            HttpResponse::NotFound(),
            format!("Portfolio item {id} not found"),
        ),
        Err(e) => error_response(
            HttpResponse::InternalServerError(),
            format!("Database error: {e}"),
        ),
    }
}

/// POST /api/admin/portfolios — create a portfolio item at the end of the list.
pub async fn create_portfolio(
    _admin: AuthenticatedAdmin,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    body: web::Json<CreatePortfolio>,
) -> impl Responder {
    let input = body.into_inner();
    if let Err(msg) = input.validate() {
        return error_response(HttpResponse::BadRequest(), msg);
    }

    match portfolio_db::insert_portfolio(db.get_ref(), input).await {
        Ok(item) => {
            cache.invalidate_public().await;
            HttpResponse::Created().json(item)
        }
        Err(e) => write_error("Failed to create portfolio item", e),
    }
}

/// PUT /api/admin/portfolios/{id} — edit a portfolio item.
pub async fn update_portfolio(
    _admin: AuthenticatedAdmin,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePortfolio>,
) -> impl Responder {
    let id = path.into_inner();
    let input = body.into_inner();
    if let Err(msg) = input.validate() {
        return error_response(HttpResponse::BadRequest(), msg);
    }

    match portfolio_db::update_portfolio(db.get_ref(), id, input).await {
        Ok(updated) => {
            cache.invalidate_public().await;
            HttpResponse::Ok().json(updated)
        }
        Err(e) => write_error("Failed to update portfolio item", e),
    }
}

/// PUT /api/admin/portfolios/{id}/status — publish or unpublish.
pub async fn update_status(
    _admin: AuthenticatedAdmin,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateStatus>,
) -> impl Responder {
    let id = path.into_inner();
    match portfolio_db::set_status(db.get_ref(), id, body.status).await {
        Ok(item) => {
            cache.invalidate_public().await;
            HttpResponse::Ok().json(item)
        }
        Err(e) => write_error("Failed to update portfolio status", e),
    }
}

/// DELETE /api/admin/portfolios/{id} — remove a portfolio item. Not undoable.
pub async fn delete_portfolio(
    _admin: AuthenticatedAdmin,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match portfolio_db::delete_portfolio(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                cache.invalidate_public().await;
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Portfolio item {id} deleted"),
                }))
            } else {
                error_response(
                    HttpResponse::NotFound(),
                    format!("Portfolio item {id} not found"),
                )
            }
        }
        Err(e) => write_error("Failed to delete portfolio item", e),
    }
}

/// POST /api/admin/portfolios/reorder — drop `active_id` onto `over_id` and persist.
///
/// Responds with the new order even when some position writes failed; their
/// ids are listed under `failed`.
pub async fn reorder_portfolios(
    _admin: AuthenticatedAdmin,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    registry: web::Data<ReorderRegistry>,
    body: web::Json<ReorderRequest>,
) -> impl Responder {
    let items = match portfolio_db::list_portfolios(db.get_ref(), None, None).await {
        Ok(items) => items,
        Err(e) => {
            return error_response(
                HttpResponse::InternalServerError(),
                format!("Failed to fetch portfolios: {e}"),
            );
        }
    };

    let store = SeaOrmOrderStore::new(db.get_ref(), RecordKind::Portfolios);
    let request = body.into_inner();
    match registry
        .get(RecordKind::Portfolios)
        .reorder(&store, items, request.active_id, request.over_id)
        .await
    {
        Ok(outcome) => {
            if outcome.writes_issued > 0 {
                cache.invalidate_public().await;
            }
            HttpResponse::Ok().json(outcome)
        }
        Err(e) => error_response(HttpResponse::NotFound(), e.to_string()),
    }
}

/// GET /api/admin/portfolios/reorder/status — whether a reorder is still persisting.
pub async fn reorder_status(
    _admin: AuthenticatedAdmin,
    registry: web::Data<ReorderRegistry>,
) -> impl Responder {
    let saving = registry.get(RecordKind::Portfolios).indicator().is_saving();
    HttpResponse::Ok().json(serde_json::json!({ "saving": saving }))
}
