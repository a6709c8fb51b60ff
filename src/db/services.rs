use sea_orm::prelude::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::services::{self, CreateService, UpdateService};
use crate::models::{KindStats, PublicationStatus, non_blank};

/// Position for a new service: one past the current maximum, or 0 for the first.
pub async fn next_order_index(db: &DatabaseConnection) -> Result<i32, DbErr> {
    let last = services::Entity::find()
        .order_by_desc(services::Column::OrderIndex)
        .one(db)
        .await?;
    Ok(last.map_or(0, |service| service.order_index + 1))
}

/// Insert a new service at the end of the list.
pub async fn insert_service(
    db: &DatabaseConnection,
    input: CreateService,
) -> Result<services::Model, DbErr> {
    let order_index = next_order_index(db).await?;
    let now = chrono::Utc::now();

    let new_service = services::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title.trim().to_string()),
        short_description: Set(non_blank(input.short_description)),
        description: Set(non_blank(input.description)),
        icon: Set(non_blank(input.icon)),
        order_index: Set(order_index),
        status: Set(input.status.unwrap_or_default()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_service.insert(db).await
}

/// Fetch services ordered by position, optionally filtered by status and capped.
pub async fn list_services(
    db: &DatabaseConnection,
    status: Option<PublicationStatus>,
    limit: Option<u64>,
) -> Result<Vec<services::Model>, DbErr> {
    let mut query = services::Entity::find().order_by_asc(services::Column::OrderIndex);
    if let Some(status) = status {
        query = query.filter(services::Column::Status.eq(status));
    }
    query.limit(limit).all(db).await
}

/// Fetch a single service by ID.
pub async fn get_service_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<services::Model>, DbErr> {
    services::Entity::find_by_id(id).one(db).await
}

/// Update an existing service.
pub async fn update_service(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateService,
) -> Result<services::Model, DbErr> {
    let service = services::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Service not found".to_string()))?;

    let mut active: services::ActiveModel = service.into();

    if let Some(title) = input.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(short_description) = input.short_description {
        active.short_description = Set(non_blank(Some(short_description)));
    }
    if let Some(description) = input.description {
        active.description = Set(non_blank(Some(description)));
    }
    if let Some(icon) = input.icon {
        active.icon = Set(non_blank(Some(icon)));
    }
    if let Some(status) = input.status {
        active.status = Set(status);
    }
    active.updated_at = Set(chrono::Utc::now());

    active.update(db).await
}

/// Set the publication status. A service already in `status` is returned as-is.
pub async fn set_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: PublicationStatus,
) -> Result<services::Model, DbErr> {
    let service = services::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Service not found".to_string()))?;

    if service.status == status {
        return Ok(service);
    }

    let mut active: services::ActiveModel = service.into();
    active.status = Set(status);
    active.updated_at = Set(chrono::Utc::now());
    active.update(db).await
}

pub async fn set_order_index(
    db: &DatabaseConnection,
    id: Uuid,
    order_index: i32,
) -> Result<(), DbErr> {
    let result = services::Entity::update_many()
        .col_expr(services::Column::OrderIndex, Expr::value(order_index))
        .filter(services::Column::Id.eq(id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(DbErr::RecordNotFound(format!("Service {id} not found")));
    }
    Ok(())
}

/// Delete a service by ID.
pub async fn delete_service(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    services::Entity::delete_by_id(id).exec(db).await
}

pub async fn count_by_status(db: &DatabaseConnection) -> Result<KindStats, DbErr> {
    let published = services::Entity::find()
        .filter(services::Column::Status.eq(PublicationStatus::Published))
        .count(db)
        .await?;
    let draft = services::Entity::find()
        .filter(services::Column::Status.eq(PublicationStatus::Draft))
        .count(db)
        .await?;

    Ok(KindStats {
        total: published + draft,
        published,
        draft,
    })
}
