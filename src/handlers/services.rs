use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use super::{error_response, write_error};
use crate::auth::middleware::AuthenticatedAdmin;
use crate::cache::RedisCache;
use crate::db::services as service_db;
use crate::models::services::{CreateService, UpdateService};
use crate::models::{ListQuery, RecordKind, ReorderRequest, UpdateStatus};
use crate::ordering::ReorderRegistry;
use crate::ordering::store::SeaOrmOrderStore;

/// GET /api/admin/services — every service in display order, drafts included.
pub async fn get_services(
    _admin: AuthenticatedAdmin,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    match service_db::list_services(db.get_ref(), query.status, query.limit).await {
        Ok(services) => HttpResponse::Ok().json(services),
        Err(e) => error_response(
            HttpResponse::InternalServerError(),
            format!("Failed to fetch services: {e}"),
        ),
    }
}

/// GET /api/admin/services/{id}
pub async fn get_service(
    _admin: AuthenticatedAdmin,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match service_db::get_service_by_id(db.get_ref(), id).await {
        Ok(Some(service)) => HttpResponse::Ok().json(service),
        Ok(None) => error_response(HttpResponse::NotFound(), format!("Service {id} not found")),
        Err(e) => error_response(
            HttpResponse::InternalServerError(),
            format!("Database error: {e}"),
        ),
    }
}

/// POST /api/admin/services
pub async fn create_service(
    _admin: AuthenticatedAdmin,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    body: web::Json<CreateService>,
) -> impl Responder {
    let input = body.into_inner();
    if let Err(msg) = input.validate() {
        return error_response(HttpResponse::BadRequest(), msg);
    }

    match service_db::insert_service(db.get_ref(), input).await {
        Ok(service) => {
            cache.invalidate_public().await;
            HttpResponse::Created().json(service)
        }
        Err(e) => write_error("Failed to create service", e),
    }
}

/// PUT /api/admin/services/{id}
pub async fn update_service(
    _admin: AuthenticatedAdmin,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateService>,
) -> impl Responder {
    let id = path.into_inner();
    let input = body.into_inner();
    if let Err(msg) = input.validate() {
        return error_response(HttpResponse::BadRequest(), msg);
    }

    match service_db::update_service(db.get_ref(), id, input).await {
        Ok(updated) => {
            cache.invalidate_public().await;
            HttpResponse::Ok().json(updated)
        }
        Err(e) => write_error("Failed to update service", e),
    }
}

/// PUT /api/admin/services/{id}/status
pub async fn update_status(
    _admin: AuthenticatedAdmin,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateStatus>,
) -> impl Responder {
    let id = path.into_inner();
    match service_db::set_status(db.get_ref(), id, body.status).await {
        Ok(service) => {
            cache.invalidate_public().await;
            HttpResponse::Ok().json(service)
        }
        Err(e) => write_error("Failed to update service status", e),
    }
}

/// DELETE /api/admin/services/{id}
pub async fn delete_service(
    _admin: AuthenticatedAdmin,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match service_db::delete_service(db.get_ref(), id).await {
        Ok(result) if result.rows_affected > 0 => {
            cache.invalidate_public().await;
            HttpResponse::Ok().json(serde_json::json!({
                "message": format!("Service {id} deleted"),
            }))
        }
        Ok(_) => error_response(HttpResponse::NotFound(), format!("Service {id} not found")),
        Err(e) => write_error("Failed to delete service", e),
    }
}

/// POST /api/admin/services/reorder
pub async fn reorder_services(
    _admin: AuthenticatedAdmin,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    registry: web::Data<ReorderRegistry>,
    body: web::Json<ReorderRequest>,
) -> impl Responder {
    let services = match service_db::list_services(db.get_ref(), None, None).await {
        Ok(services) => services,
        Err(e) => {
            return error_response(
                HttpResponse::InternalServerError(),
                format!("Failed to fetch services: {e}"),
            );
        }
    };

    let store = SeaOrmOrderStore::new(db.get_ref(), RecordKind::Services);
    let ReorderRequest { active_id, over_id } = body.into_inner();
    match registry
        .get(RecordKind::Services)
        .reorder(&store, services, active_id, over_id)
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

/// GET /api/admin/services/reorder/status
pub async fn reorder_status(
    _admin: AuthenticatedAdmin,
    registry: web::Data<ReorderRegistry>,
) -> impl Responder {
    let saving = registry.get(RecordKind::Services).indicator().is_saving();
    HttpResponse::Ok().json(serde_json::json!({ "saving": saving }))
}
