pub mod portfolio;
pub mod services;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Publication status shared by portfolios and services, stored as lowercase text.
///
/// Only `Published` records are visible on the public routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    #[default]
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
}

/// The two record kinds the admin panel manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Portfolios,
    Services,
}

/// Query string accepted by the admin list endpoints: `?status=published&limit=10`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<PublicationStatus>,
    pub limit: Option<u64>,
}

/// Body of `PUT /api/admin/{kind}/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatus {
    pub status: PublicationStatus,
}

/// Body of `POST /api/admin/{kind}/reorder`.
///
/// `active_id` is the dragged record, `over_id` the record whose position it was dropped on.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRequest {
    pub active_id: Uuid,
    pub over_id: Uuid,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KindStats {
    pub total: u64,
    pub published: u64,
    pub draft: u64,
}

/// Counts shown on the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub portfolios: KindStats,
    pub services: KindStats,
    pub draft_items: u64,
}

impl DashboardStats {
    pub fn new(portfolios: KindStats, services: KindStats) -> Self {
        let draft_items = portfolios.draft + services.draft;
        Self {
            portfolios,
            services,
            draft_items,
        }
    }
}

/// Treat blank form fields as absent: `Some("  ")` becomes `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
