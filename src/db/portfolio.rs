use sea_orm::prelude::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::portfolio::{self, CreatePortfolio, UpdatePortfolio, normalize_tech_stack};
use crate::models::{KindStats, PublicationStatus, non_blank};

/// Position for a new portfolio item: one past the current maximum, or 0 for the first.
pub async fn next_order_index(db: &DatabaseConnection) -> Result<i32, DbErr> {
    let last = portfolio::Entity::find()
        .order_by_desc(portfolio::Column::OrderIndex)
        .one(db)
        .await?;
    Ok(last.map_or(0, |item| item.order_index + 1))
}

/// Insert a new portfolio item at the end of the list.
pub async fn insert_portfolio(
    db: &DatabaseConnection,
    input: CreatePortfolio,
) -> Result<portfolio::Model, DbErr> {
    let order_index = next_order_index(db).await?;
    let slug = input.resolved_slug();
    let now = chrono::Utc::now();

    let new_portfolio = portfolio::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title.trim().to_string()),
        slug: Set(slug),
        description: Set(non_blank(input.description)),
        tech_stack: Set(normalize_tech_stack(input.tech_stack)),
        featured_image: Set(non_blank(input.featured_image)),
        gallery_images: Set(input.gallery_images),
        live_url: Set(non_blank(input.live_url)),
        github_url: Set(non_blank(input.github_url)),
        order_index: Set(order_index),
        status: Set(input.status.unwrap_or_default()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_portfolio.insert(db).await
}

/// Fetch portfolio items ordered by position, optionally filtered by status and capped.
pub async fn list_portfolios(
    db: &DatabaseConnection,
    status: Option<PublicationStatus>,
    limit: Option<u64>,
) -> Result<Vec<portfolio::Model>, DbErr> {
    let mut query = portfolio::Entity::find().order_by_asc(portfolio::Column::OrderIndex);
    if let Some(status) = status {
        query = query.filter(portfolio::Column::Status.eq(status));
    }
    query.limit(limit).all(db).await
}

/// Fetch a single portfolio item by ID.
pub async fn get_portfolio_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<portfolio::Model>, DbErr> {
    portfolio::Entity::find_by_id(id).one(db).await
}

/// Fetch a published portfolio item by its slug. Drafts are never returned.
pub async fn get_published_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<portfolio::Model>, DbErr> {
    portfolio::Entity::find()
        .filter(portfolio::Column::Slug.eq(slug))
        .filter(portfolio::Column::Status.eq(PublicationStatus::Published))
        .one(db)
        .await
}

/// Update an existing portfolio item with the supplied fields.
///
/// Blank optional text fields clear the stored value.
pub async fn update_portfolio(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdatePortfolio,
) -> Result<portfolio::Model, DbErr> {
    let item = portfolio::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Portfolio not found".to_string()))?;

    let mut active: portfolio::ActiveModel = item.into();

    if let Some(title) = input.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(slug) = input.slug {
        active.slug = Set(slug.trim().to_string());
    }
    if let Some(description) = input.description {
        active.description = Set(non_blank(Some(description)));
    }
    if let Some(tech_stack) = input.tech_stack {
        active.tech_stack = Set(normalize_tech_stack(tech_stack));
    }
    if let Some(featured_image) = input.featured_image {
        active.featured_image = Set(non_blank(Some(featured_image)));
    }
    if let Some(gallery_images) = input.gallery_images {
        active.gallery_images = Set(gallery_images);
    }
    if let Some(live_url) = input.live_url {
        active.live_url = Set(non_blank(Some(live_url)));
    }
    if let Some(github_url) = input.github_url {
        active.github_url = Set(non_blank(Some(github_url)));
    }
    if let Some(status) = input.status {
        active.status = Set(status);
    }
    active.updated_at = Set(chrono::Utc::now());

    active.update(db).await
}

/// Set the publication status. Leaves the row untouched when it already has `status`.
pub async fn set_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: PublicationStatus,
) -> Result<portfolio::Model, DbErr> {
    let item = portfolio::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Portfolio not found".to_string()))?;

    if item.status == status {
        return Ok(item);
    }

    let mut active: portfolio::ActiveModel = item.into();
    active.status = Set(status);
    active.updated_at = Set(chrono::Utc::now());
    active.update(db).await
}

/// Write a single item's position.
pub async fn set_order_index(
    db: &DatabaseConnection,
    id: Uuid,
    order_index: i32,
) -> Result<(), DbErr> {
    let result = portfolio::Entity::update_many()
        .col_expr(portfolio::Column::OrderIndex, Expr::value(order_index))
        .filter(portfolio::Column::Id.eq(id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(DbErr::RecordNotFound(format!("Portfolio {id} not found")));
    }
    Ok(())
}

/// Delete a portfolio item by ID. Positions of the remaining items are left as they are.
pub async fn delete_portfolio(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    portfolio::Entity::delete_by_id(id).exec(db).await
}

/// Total, published and draft counts for the dashboard.
pub async fn count_by_status(db: &DatabaseConnection) -> Result<KindStats, DbErr> {
    let published = portfolio::Entity::find()
        .filter(portfolio::Column::Status.eq(PublicationStatus::Published))
        .count(db)
        .await?;
    let draft = portfolio::Entity::find()
        .filter(portfolio::Column::Status.eq(PublicationStatus::Draft))
        .count(db)
        .await?;

    Ok(KindStats {
        total: published + draft,
        published,
        draft,
    })
}
